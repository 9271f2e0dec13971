/// Categories offered by the entry form. Stored records may carry any text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Entertainment,
    Health,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup. Unknown names return `None` so callers can
    /// decide whether to keep the free text.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "travel" => Some(Self::Travel),
            "shopping" => Some(Self::Shopping),
            "entertainment" => Some(Self::Entertainment),
            "health" => Some(Self::Health),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Travel,
            Self::Shopping,
            Self::Entertainment,
            Self::Health,
            Self::Other,
        ]
    }

    /// Canonical spelling for a known category, the trimmed input otherwise.
    pub fn normalize(s: &str) -> String {
        match Self::parse(s) {
            Some(c) => c.as_str().to_string(),
            None => s.trim().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
