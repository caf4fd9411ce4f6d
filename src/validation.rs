/// Outcome of a preflight check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(String),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(reason) => Some(reason),
        }
    }
}
