use std::fmt::{Display, Formatter, Result as FmtResult};

/// Storage prefix chosen from a probed display aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectClass {
    Landscape,
    Portrait,
    Other,
}

impl AspectClass {
    /// `"16:9"` is landscape, `"9:16"` is portrait, anything else is other.
    pub fn classify(display_aspect_ratio: &str) -> Self {
        match display_aspect_ratio {
            "16:9" => AspectClass::Landscape,
            "9:16" => AspectClass::Portrait,
            _ => AspectClass::Other,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            AspectClass::Landscape => "landscape",
            AspectClass::Portrait => "portrait",
            AspectClass::Other => "other",
        }
    }
}

impl Display for AspectClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        let cases = [
            ("16:9", AspectClass::Landscape),
            ("9:16", AspectClass::Portrait),
            ("4:3", AspectClass::Other),
            ("1:1", AspectClass::Other),
            ("", AspectClass::Other),
            ("16:10", AspectClass::Other),
            (" 16:9", AspectClass::Other),
        ];
        for (ratio, expected) in cases {
            assert_eq!(AspectClass::classify(ratio), expected, "ratio {:?}", ratio);
        }
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(AspectClass::Landscape.prefix(), "landscape");
        assert_eq!(AspectClass::Portrait.to_string(), "portrait");
        assert_eq!(AspectClass::Other.prefix(), "other");
    }
}
