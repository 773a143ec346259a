use serde::{Deserialize, Serialize};

/// Contractual form of an employment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Temporary,
    Contract,
    Intern,
    Contractor,
    Outsource,
}

impl EmploymentType {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
            EmploymentType::Temporary => "temporary",
            EmploymentType::Contract => "contract",
            EmploymentType::Intern => "intern",
            EmploymentType::Contractor => "contractor",
            EmploymentType::Outsource => "outsource",
        }
    }

    /// Regular payroll employment.
    pub fn is_formal(self) -> bool {
        matches!(self, EmploymentType::FullTime | EmploymentType::PartTime)
    }

    pub fn is_flexible(self) -> bool {
        matches!(
            self,
            EmploymentType::Temporary | EmploymentType::Contract | EmploymentType::Contractor
        )
    }
}
