use serde::{Deserialize, Serialize};

/// A string that does not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// Only these two paper categories produce letters. Any other code in a
// case header (e.g. OSC/XYZ/..) is dropped by the segmenter.
str_enum!(CaseCategory {
    PlanningPermission => "PKM",
    BuildingPlan => "BGN",
});

impl CaseCategory {
    /// Resolve the CATEGORY token of an `ORG/CATEGORY/NUMBER/YEAR` paper code.
    pub fn from_code(code: &str) -> Option<Self> {
        code.trim().to_ascii_uppercase().parse().ok()
    }

    /// Human-readable "Jenis Permohonan" shown in the letter.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PlanningPermission => "Kebenaran Merancang",
            Self::BuildingPlan => "Bangunan",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_code() {
        assert_eq!("PKM".parse::<CaseCategory>(), Ok(CaseCategory::PlanningPermission));
        assert_eq!(CaseCategory::BuildingPlan.as_str(), "BGN");
    }

    #[test]
    fn from_code_is_case_insensitive() {
        assert_eq!(CaseCategory::from_code("pkm"), Some(CaseCategory::PlanningPermission));
        assert_eq!(CaseCategory::from_code(" Bgn "), Some(CaseCategory::BuildingPlan));
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(CaseCategory::from_code("XYZ"), None);
        let err = "KM".parse::<CaseCategory>().unwrap_err();
        assert_eq!(err.field, "CaseCategory");
        assert_eq!(err.value, "KM");
    }

    #[test]
    fn labels_are_distinct() {
        assert_eq!(CaseCategory::PlanningPermission.label(), "Kebenaran Merancang");
        assert_eq!(CaseCategory::BuildingPlan.label(), "Bangunan");
    }
}
