//! Project category filter

/// Which projects are shown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Category(String),
}

impl ProjectFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => c == category,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Category(c) => c,
        }
    }

    /// Next filter in `All, categories..` order, wrapping around
    pub fn next(&self, categories: &[String]) -> Self {
        let position = match self {
            Self::All => None,
            Self::Category(c) => categories.iter().position(|x| x == c),
        };
        match position {
            None => categories
                .first()
                .map(|c| Self::Category(c.clone()))
                .unwrap_or(Self::All),
            Some(i) if i + 1 < categories.len() => Self::Category(categories[i + 1].clone()),
            Some(_) => Self::All,
        }
    }

    /// Previous filter, wrapping around
    pub fn prev(&self, categories: &[String]) -> Self {
        match self {
            Self::All => categories
                .last()
                .map(|c| Self::Category(c.clone()))
                .unwrap_or(Self::All),
            Self::Category(c) => match categories.iter().position(|x| x == c) {
                Some(i) if i > 0 => Self::Category(categories[i - 1].clone()),
                _ => Self::All,
            },
        }
    }
}
