use armorcheck_types::{ArmorcheckData, Finding, Severity, Verdict};

#[derive(Clone, Debug, Default)]
pub struct SeverityCounts {
    pub info: u32,
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }
}

/// Result of verifying one resource (the policy or a single rule).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    pub findings: Vec<Finding>,
    /// Describe documents compared.
    pub documents: u32,
    /// Field expectations evaluated, summed over documents.
    pub assertions: u32,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn merge(&mut self, other: Report) {
        self.findings.extend(other.findings);
        self.documents += other.documents;
        self.assertions += other.assertions;
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub data: ArmorcheckData,
    pub counts: SeverityCounts,
}
