//! Structured results of a validation run.
//!
//! A failed expectation is recorded on its [`CheckResult`] instead of
//! aborting the run; [`ValidationReport::passed`] reduces all checks to a
//! single verdict.

/// A named number printed as part of a check
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub label: String,
    pub value: f64,
}

/// Verdict of one check
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Passed,
    Failed { reasons: Vec<String> },
}

/// Everything one check measured and concluded
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// 1-based position in the run
    pub number: usize,
    pub name: String,
    pub measurements: Vec<Measurement>,
    /// Free-form lines shown after the measurements
    pub notes: Vec<String>,
    /// Shown when the check passed
    pub success_message: String,
    failures: Vec<String>,
}

impl CheckResult {
    pub fn new(number: usize, name: impl Into<String>, success_message: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            measurements: Vec::new(),
            notes: Vec::new(),
            success_message: success_message.into(),
            failures: Vec::new(),
        }
    }

    /// Record a measurement and hand the value back
    pub fn measure(&mut self, label: impl Into<String>, value: f64) -> f64 {
        self.measurements.push(Measurement {
            label: label.into(),
            value,
        });
        value
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.notes.push(text.into());
    }

    /// Record `reason` as a failure unless `condition` holds
    pub fn expect(&mut self, condition: bool, reason: impl Into<String>) {
        if !condition {
            self.failures.push(reason.into());
        }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn outcome(&self) -> CheckOutcome {
        if self.passed() {
            CheckOutcome::Passed
        } else {
            CheckOutcome::Failed {
                reasons: self.failures.clone(),
            }
        }
    }
}

/// All check results of one run, in execution order
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// True only if every check passed (and at least one ran)
    pub fn passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(CheckResult::passed)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|check| !check.passed())
    }

    /// Process exit status for this run: 0 when it passed, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.passed() { 0 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_expectations() {
        let mut check = CheckResult::new(1, "Demo", "all good");
        let value = check.measure("Similarity(A, B)", 0.5);
        assert_eq!(value, 0.5);

        check.expect(true, "never recorded");
        assert!(check.passed());
        assert_eq!(check.outcome(), CheckOutcome::Passed);

        check.expect(false, "value too small");
        check.expect(false, "value too large");
        assert!(!check.passed());
        assert_eq!(
            check.outcome(),
            CheckOutcome::Failed {
                reasons: vec!["value too small".to_string(), "value too large".to_string()]
            }
        );
    }

    #[test]
    fn test_report_requires_every_check() {
        let mut report = ValidationReport::new();
        assert!(!report.passed(), "an empty report is not a success");

        report.push(CheckResult::new(1, "first", "ok"));
        assert!(report.passed());

        let mut failing = CheckResult::new(2, "second", "ok");
        failing.expect(false, "broken");
        report.push(failing);
        report.push(CheckResult::new(3, "third", "ok"));

        assert!(!report.passed());
        let failed: Vec<usize> = report.failed_checks().map(|c| c.number).collect();
        assert_eq!(failed, vec![2]);
    }

    #[test]
    fn test_exit_code() {
        let mut report = ValidationReport::new();
        assert_eq!(report.exit_code(), 1);

        report.push(CheckResult::new(1, "first", "ok"));
        assert_eq!(report.exit_code(), 0);

        let mut failing = CheckResult::new(2, "second", "ok");
        failing.expect(false, "broken");
        report.push(failing);
        assert_eq!(report.exit_code(), 1);
    }
}
