//! Tech-stack data: technology glyphs and category lists.
//!
//! Pure data. Unknown technology names resolve to [`DEFAULT_GLYPH`].

use serde::Serialize;

/// Glyph used when a technology has no entry.
pub const DEFAULT_GLYPH: &str = "si-javascript";

const TECH_GLYPHS: &[(&str, &str)] = &[
    ("JavaScript", "si-javascript"),
    ("Java", "fa-java"),
    ("Python", "si-python"),
    ("TypeScript", "si-typescript"),
    ("NodeJS", "si-nodedotjs"),
    ("Express", "si-express"),
    ("JWT", "si-jsonwebtokens"),
    ("SQL Lite", "si-sqlite"),
    ("PostgreSQL", "si-postgresql"),
    ("Mongo", "si-mongodb"),
    ("Redis", "si-redis"),
    ("Axios", "fa-server"),
    ("Bcrypt", "fa-robot"),
    ("Dotenv", "si-dotenv"),
    ("HTML", "si-html5"),
    ("CSS", "si-css3"),
    ("React", "si-react"),
    ("Tailwindcss", "si-tailwindcss"),
    ("Docker", "si-docker"),
    ("CI/CD", "fa-code-branch"),
    ("Kubernetes", "si-kubernetes"),
    ("YAML", "si-yaml"),
    ("AWS", "fa-cloud"),
    ("Google Cloud", "si-googlecloud"),
    ("ScikitLearn", "si-scikitlearn"),
    ("Numpy", "si-numpy"),
    ("Pandas", "si-pandas"),
    ("Matplotlib", "fa-chart-line"),
    ("Seaborn", "fa-chart-bar"),
    ("Tensorflow", "si-tensorflow"),
    ("Keras", "si-keras"),
    ("Kaggle", "si-kaggle"),
    ("HuggingFace", "si-huggingface"),
];

/// Glyph identifier for a technology, or [`DEFAULT_GLYPH`].
#[must_use]
pub fn glyph_for(name: &str) -> &'static str {
    TECH_GLYPHS
        .iter()
        .find(|(tech, _)| *tech == name)
        .map_or(DEFAULT_GLYPH, |&(_, glyph)| glyph)
}

/// Column of the tech-stack grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// Left column.
    Left,
    /// Right column.
    Right,
}

/// A named, ordered group of technologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TechCategory {
    /// Category heading.
    pub name: &'static str,
    /// Grid column.
    pub column: Column,
    /// Technologies in display order.
    pub technologies: &'static [&'static str],
}

impl TechCategory {
    /// Page region of this category's card, e.g. `"stack-backend"`.
    #[must_use]
    pub fn region_name(&self) -> String {
        format!("stack-{}", self.name.to_lowercase())
    }
}

/// Every category in display order.
pub const CATEGORIES: &[TechCategory] = &[
    TechCategory {
        name: "Backend",
        column: Column::Left,
        technologies: &[
            "JavaScript",
            "TypeScript",
            "Java",
            "Python",
            "NodeJS",
            "Express",
            "JWT",
            "Axios",
            "Bcrypt",
            "Dotenv",
        ],
    },
    TechCategory {
        name: "Frontend",
        column: Column::Left,
        technologies: &["HTML", "CSS", "React", "Tailwindcss"],
    },
    TechCategory {
        name: "Databases",
        column: Column::Left,
        technologies: &["SQL Lite", "PostgreSQL", "Mongo", "Redis"],
    },
    TechCategory {
        name: "DevOps",
        column: Column::Right,
        technologies: &["Docker", "CI/CD", "Kubernetes", "YAML"],
    },
    TechCategory {
        name: "Cloud",
        column: Column::Right,
        technologies: &["AWS", "Google Cloud"],
    },
    TechCategory {
        name: "AI",
        column: Column::Right,
        technologies: &[
            "ScikitLearn",
            "Numpy",
            "Pandas",
            "Matplotlib",
            "Seaborn",
            "Tensorflow",
            "Keras",
            "Kaggle",
            "HuggingFace",
        ],
    },
];

/// Categories of one column, in display order.
pub fn column(column: Column) -> impl Iterator<Item = &'static TechCategory> {
    CATEGORIES.iter().filter(move |c| c.column == column)
}

/// Look up a category by name.
#[must_use]
pub fn category(name: &str) -> Option<&'static TechCategory> {
    CATEGORIES.iter().find(|c| c.name == name)
}
