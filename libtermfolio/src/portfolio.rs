//! Fixed portfolio content
//!
//! Everything here is compiled in and immutable. Screens hold `&'static`
//! references into these tables and derive whatever they display.

/// Who the portfolio is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub title: &'static str,
    pub bio: &'static str,
    pub location: &'static str,
}

pub const PROFILE: Profile = Profile {
    name: "Janpol Hidalgo",
    title: "Software Engineer",
    bio: "Full-stack developer passionate about building elegant solutions",
    location: "Sagay City, Negros Occidental, Philippines",
};

/// Skill grouping shown as a tab on the skills screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillCategory {
    Frontend,
    Backend,
    Mobile,
    DevOps,
    Database,
    Languages,
}

impl SkillCategory {
    /// Tab order
    pub const ALL: [SkillCategory; 6] = [
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Mobile,
        SkillCategory::DevOps,
        SkillCategory::Database,
        SkillCategory::Languages,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Backend => "Backend",
            SkillCategory::Mobile => "Mobile",
            SkillCategory::DevOps => "DevOps",
            SkillCategory::Database => "Database",
            SkillCategory::Languages => "Languages",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SkillCategory::Frontend => "🎨",
            SkillCategory::Backend => "⚙",
            SkillCategory::Mobile => "📱",
            SkillCategory::DevOps => "🐳",
            SkillCategory::Database => "🗄",
            SkillCategory::Languages => "💻",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SkillCategory::Frontend => "UI/UX & client-side development",
            SkillCategory::Backend => "Server-side & APIs",
            SkillCategory::Mobile => "Mobile app development",
            SkillCategory::DevOps => "Infrastructure & deployment",
            SkillCategory::Database => "Data storage & management",
            SkillCategory::Languages => "Programming languages",
        }
    }

    /// Position in [`SkillCategory::ALL`]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    /// 1 to 5
    pub level: u8,
    pub category: SkillCategory,
    pub years: u8,
    pub projects: u32,
    pub icon: &'static str,
    /// `#RRGGBB`
    pub color: &'static str,
}

const fn skill(
    name: &'static str,
    level: u8,
    category: SkillCategory,
    years: u8,
    projects: u32,
    icon: &'static str,
    color: &'static str,
) -> Skill {
    Skill {
        name,
        level,
        category,
        years,
        projects,
        icon,
        color,
    }
}

use SkillCategory::{Backend, Database, DevOps, Frontend, Languages, Mobile};

pub const SKILLS: &[Skill] = &[
    skill("React", 5, Frontend, 3, 20, "⚛", "#61DAFB"),
    skill("TypeScript", 4, Frontend, 3, 25, "🔷", "#3178C6"),
    skill("JavaScript", 5, Frontend, 4, 30, "🟨", "#F7DF1E"),
    skill("Next.js", 4, Frontend, 2, 15, "▲", "#FFFFFF"),
    skill("TailwindCSS", 5, Frontend, 2, 18, "🎨", "#06B6D4"),
    skill("HTML/CSS", 5, Frontend, 4, 35, "🌐", "#E34F26"),
    skill("Node.js", 4, Backend, 3, 18, "🟩", "#339933"),
    skill("Go", 4, Backend, 2, 15, "🐹", "#00ADD8"),
    skill("Python", 3, Backend, 2, 10, "🐍", "#3776AB"),
    skill("Express.js", 4, Backend, 3, 16, "🚂", "#FFFFFF"),
    skill("REST APIs", 5, Backend, 3, 22, "🔌", "#00D9FF"),
    skill("Flutter", 4, Mobile, 2, 8, "🎯", "#02569B"),
    skill("Dart", 4, Mobile, 2, 8, "💙", "#0175C2"),
    skill("React Native", 3, Mobile, 1, 5, "📱", "#61DAFB"),
    skill("Docker", 4, DevOps, 2, 12, "🐳", "#2496ED"),
    skill("Git", 5, DevOps, 4, 50, "🔧", "#F05032"),
    skill("GitHub Actions", 4, DevOps, 2, 10, "⚡", "#2088FF"),
    skill("Linux", 4, DevOps, 3, 20, "🐧", "#FCC624"),
    skill("AWS", 3, DevOps, 1, 6, "☁", "#FF9900"),
    skill("PostgreSQL", 4, Database, 3, 15, "🐘", "#336791"),
    skill("MongoDB", 4, Database, 2, 12, "🍃", "#47A248"),
    skill("Redis", 3, Database, 1, 5, "🔴", "#DC382D"),
    skill("MySQL", 4, Database, 3, 14, "🐬", "#4479A1"),
    skill("JavaScript", 5, Languages, 4, 30, "🟨", "#F7DF1E"),
    skill("TypeScript", 4, Languages, 3, 25, "🔷", "#3178C6"),
    skill("Go", 4, Languages, 2, 15, "🐹", "#00ADD8"),
    skill("Python", 3, Languages, 2, 10, "🐍", "#3776AB"),
    skill("Dart", 4, Languages, 2, 8, "💙", "#0175C2"),
    skill("SQL", 4, Languages, 3, 18, "📊", "#CC2927"),
];

/// Skills in `category`, in table order
pub fn skills_in(category: SkillCategory) -> impl Iterator<Item = &'static Skill> {
    SKILLS.iter().filter(move |s| s.category == category)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceKind {
    Work,
    Education,
    Certification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    pub kind: ExperienceKind,
    pub title: &'static str,
    pub organization: &'static str,
    pub location: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub highlights: &'static [&'static str],
    pub skills: &'static [&'static str],
}

impl Experience {
    pub fn icon(&self) -> &'static str {
        match self.kind {
            ExperienceKind::Work => "💼",
            ExperienceKind::Education => "🎓",
            ExperienceKind::Certification => "📜",
        }
    }
}

pub const EXPERIENCE: &[Experience] = &[
    Experience {
        kind: ExperienceKind::Work,
        title: "Part Time Mobile Developer",
        organization: "K92 Paints",
        location: "Philippines",
        start: "December 2024",
        end: "April 2025",
        highlights: &[
            "Developed and maintained a mobile application using Flutter",
            "Implemented features for paint color selection and visualization",
            "Collaborated with design team to create intuitive user interfaces",
            "Integrated backend APIs for real-time inventory management",
        ],
        skills: &["Flutter", "Dart", "Mobile Development", "API Integration"],
    },
    Experience {
        kind: ExperienceKind::Education,
        title: "Bachelor of Science in Computer Science",
        organization: "University of St. La Salle - Bacolod",
        location: "Philippines",
        start: "August 2022",
        end: "April 2026",
        highlights: &[
            "Focused on game development, data structures and algorithms, and artificial intelligence",
            "Dean's List recipient for academic excellence",
        ],
        skills: &["Algorithms", "Data Structures", "Game Development", "AI", "ML", "Data Science"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub label: &'static str,
    /// What gets copied to the clipboard
    pub value: &'static str,
    pub link: &'static str,
    pub icon: &'static str,
}

pub const CONTACTS: &[Contact] = &[
    Contact {
        label: "LinkedIn",
        value: "https://www.linkedin.com/in/janpol-hidalgo",
        link: "https://www.linkedin.com/in/janpol-hidalgo-64174a241/",
        icon: "💼",
    },
    Contact {
        label: "GitHub",
        value: "github.com/Polqt",
        link: "https://github.com/Polqt",
        icon: "🐙",
    },
    Contact {
        label: "Email",
        value: "poyhidalgo@gmail.com",
        link: "mailto:poyhidalgo@gmail.com",
        icon: "📧",
    },
    Contact {
        label: "Portfolio",
        value: "https://yojepoy.vercel.app/",
        link: "https://yojepoy.vercel.app/",
        icon: "🌐",
    },
];
