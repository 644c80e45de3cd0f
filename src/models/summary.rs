/// One labeled statistic, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFact {
    pub name: String,
    pub value: String,
}

impl SummaryFact {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
