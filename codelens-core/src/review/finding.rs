//! Findings and the structured review payload
//!
//! These types are the typed side of the `suggest_review` tool contract.
//! Decoding is strict on the enumerations and the score range so a reply that
//! drifts from the contract fails at the boundary instead of being stored.

use serde::{Deserialize, Deserializer, Serialize};

/// Category of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Bug,
    Security,
    Performance,
    Style,
}

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One reported issue in the submitted code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub severity: Severity,
    /// 1-based source line, when the model could attribute one
    #[serde(
        default,
        deserialize_with = "deserialize_line",
        skip_serializing_if = "Option::is_none"
    )]
    pub line: Option<u32>,
    pub message: String,
    pub suggestion: String,
}

/// Arguments of a `suggest_review` tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub findings: Vec<Finding>,
    pub summary: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    /// Empty when the model declines to rewrite
    #[serde(default, deserialize_with = "deserialize_rewritten_code")]
    pub rewritten_code: String,
}

impl ReviewPayload {
    /// Split off the nested document stored in the `findings` column
    pub fn findings_document(&self) -> FindingsDocument {
        FindingsDocument {
            findings: self.findings.clone(),
            summary: self.summary.clone(),
        }
    }

    /// Count findings at a given severity
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Findings plus summary, persisted together as one JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindingsDocument {
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub summary: String,
}

/// Accept any JSON number; non-positive values and null mean "no line"
fn deserialize_line<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|n| n.is_finite() && *n >= 1.0)
        .map(|n| n.round().min(u32::MAX as f64) as u32))
}

/// A declined rewrite may arrive as `null`
fn deserialize_rewritten_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Score is a JSON number that must round into 0..=100
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom("score must be a finite number"));
    }

    let rounded = value.round();
    if !(0.0..=100.0).contains(&rounded) {
        return Err(serde::de::Error::custom(format!(
            "score {} is outside 0..=100",
            value
        )));
    }

    Ok(rounded as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> serde_json::Value {
        json!({
            "findings": [{
                "type": "bug",
                "severity": "error",
                "line": 1,
                "message": "Division by zero",
                "suggestion": "Guard divisor"
            }],
            "summary": "One bug found.",
            "score": 40,
            "rewritten_code": "def f(x):\n  if x==0: raise ValueError()\n  return x/0"
        })
    }

    #[test]
    fn test_decode_payload() {
        let payload: ReviewPayload = serde_json::from_value(sample_payload()).unwrap();
        assert_eq!(payload.score, 40);
        assert_eq!(payload.summary, "One bug found.");
        assert_eq!(payload.findings.len(), 1);

        let finding = &payload.findings[0];
        assert_eq!(finding.kind, FindingKind::Bug);
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.line, Some(1));
    }

    #[test]
    fn test_reencode_keeps_wire_names() {
        let payload: ReviewPayload = serde_json::from_value(sample_payload()).unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, sample_payload());
    }

    #[test]
    fn test_line_is_optional() {
        let finding: Finding = serde_json::from_value(json!({
            "type": "style",
            "severity": "info",
            "message": "Long line",
            "suggestion": "Wrap it"
        }))
        .unwrap();
        assert_eq!(finding.line, None);

        let finding: Finding = serde_json::from_value(json!({
            "type": "style",
            "severity": "info",
            "line": null,
            "message": "Long line",
            "suggestion": "Wrap it"
        }))
        .unwrap();
        assert_eq!(finding.line, None);

        let encoded = serde_json::to_value(&finding).unwrap();
        assert!(encoded.get("line").is_none());
    }

    #[test]
    fn test_line_accepts_float_and_drops_zero() {
        let finding: Finding = serde_json::from_value(json!({
            "type": "performance",
            "severity": "warning",
            "line": 12.0,
            "message": "Quadratic loop",
            "suggestion": "Use a set"
        }))
        .unwrap();
        assert_eq!(finding.line, Some(12));

        let finding: Finding = serde_json::from_value(json!({
            "type": "performance",
            "severity": "warning",
            "line": 0,
            "message": "Quadratic loop",
            "suggestion": "Use a set"
        }))
        .unwrap();
        assert_eq!(finding.line, None);
    }

    #[test]
    fn test_unknown_enum_rejected() {
        let result: Result<Finding, _> = serde_json::from_value(json!({
            "type": "typo",
            "severity": "error",
            "message": "x",
            "suggestion": "y"
        }));
        assert!(result.is_err());

        let result: Result<Finding, _> = serde_json::from_value(json!({
            "type": "bug",
            "severity": "critical",
            "message": "x",
            "suggestion": "y"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_score_rounding_and_range() {
        let mut value = sample_payload();
        value["score"] = json!(72.6);
        let payload: ReviewPayload = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(payload.score, 73);

        value["score"] = json!(101);
        assert!(serde_json::from_value::<ReviewPayload>(value.clone()).is_err());

        value["score"] = json!(-3);
        assert!(serde_json::from_value::<ReviewPayload>(value.clone()).is_err());

        value["score"] = json!("90");
        assert!(serde_json::from_value::<ReviewPayload>(value).is_err());
    }

    #[test]
    fn test_missing_rewritten_code_defaults_empty() {
        let mut value = sample_payload();
        value.as_object_mut().unwrap().remove("rewritten_code");
        let payload: ReviewPayload = serde_json::from_value(value).unwrap();
        assert!(payload.rewritten_code.is_empty());
    }

    #[test]
    fn test_null_rewritten_code_is_empty() {
        let mut value = sample_payload();
        value["rewritten_code"] = serde_json::Value::Null;
        let payload: ReviewPayload = serde_json::from_value(value).unwrap();
        assert!(payload.rewritten_code.is_empty());
        assert_eq!(payload.score, 40);
        assert_eq!(payload.findings.len(), 1);
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let mut value = sample_payload();
        value.as_object_mut().unwrap().remove("summary");
        assert!(serde_json::from_value::<ReviewPayload>(value).is_err());
    }

    #[test]
    fn test_findings_document() {
        let payload: ReviewPayload = serde_json::from_value(sample_payload()).unwrap();
        let doc = payload.findings_document();
        assert_eq!(doc.summary, "One bug found.");
        assert_eq!(doc.findings, payload.findings);
        assert_eq!(payload.count_severity(Severity::Error), 1);
        assert_eq!(payload.count_severity(Severity::Info), 0);
    }
}
