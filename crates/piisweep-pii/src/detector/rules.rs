//! Standalone detection rule table
//!
//! Each rule pairs a PII kind with a field-name trigger and a value matcher.
//! A field is flagged when its name equals the trigger OR its value matches;
//! either is sufficient, so a structural match and a labelled field are
//! treated alike. Rules run in [`PIIType::PRIORITY`] order and the first hit
//! wins, which matters where kinds overlap (an email whose domain is also a
//! payment provider is reported as an email).

use crate::detector::PIIType;
use crate::record;
use regex::Regex;
use std::collections::HashSet;

/// UPI provider suffixes recognized after the `@` of a payment handle
pub const PAYMENT_PROVIDERS: &[&str] = &[
    "abcdicici",
    "apl",
    "yapl",
    "rapl",
    "abfspay",
    "bpunity",
    "jarunity",
    "axisb",
    "yescred",
    "yescurie",
    "yesfam",
    "fifederal",
    "fkaxis",
    "freoicici",
    "okaxis",
    "okhdfcbank",
    "okicici",
    "oksbi",
    "yesg",
    "inhdfc",
    "jupiteraxis",
    "goaxb",
    "kbaxis",
    "kphdfc",
    "ikwik",
    "mvhdfc",
    "naviaxis",
    "niyoicici",
    "oneyes",
    "paytm",
    "ptyes",
    "ptaxis",
    "pthdfc",
    "ptsbi",
    "ybl",
    "ibl",
    "axl",
    "yespop",
    "rmrbl",
    "pingpay",
    "seyes",
    "shriramhdfcbank",
    "superyes",
    "tapicici",
    "timecosmos",
    "axisbank",
    "yestp",
    "idfcbank",
    "waicici",
    "icici",
    "waaxis",
    "wahdfcbank",
    "wasbi",
];

pub(crate) const PHONE_PATTERN: &str = r"^\d{10}$";
pub(crate) const NATIONAL_ID_PATTERN: &str = r"^\d{4} ?\d{4} ?\d{4}$";
pub(crate) const PASSPORT_PATTERN: &str = r"^[A-Z]\d{7}$";
pub(crate) const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

/// How a rule inspects a field value
#[derive(Debug, Clone)]
pub enum ValueMatcher {
    /// Anchored regex over the whole trimmed value
    Pattern(Regex),

    /// Exactly one `@` whose suffix is a known payment provider
    PaymentHandle(HashSet<String>),
}

impl ValueMatcher {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Pattern(regex) => regex.is_match(text),
            Self::PaymentHandle(providers) => {
                let mut parts = text.split('@');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(_), Some(provider), None) => {
                        providers.contains(&provider.to_lowercase())
                    }
                    _ => false,
                }
            }
        }
    }
}

/// One standalone detection rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: PIIType,
    pub field_name: &'static str,
    pub matcher: ValueMatcher,
}

impl Rule {
    pub fn applies(&self, field: &str, text: &str) -> bool {
        field == self.field_name || self.matcher.matches(text)
    }
}

/// The ordered rule table plus the email grammar used by the group check
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    email: Regex,
}

impl RuleSet {
    /// Build the standard rule table, extending the provider allow-list
    pub fn standard<I, S>(extra_providers: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let providers: HashSet<String> = PAYMENT_PROVIDERS
            .iter()
            .map(|p| p.to_string())
            .chain(
                extra_providers
                    .into_iter()
                    .map(|p| p.as_ref().trim().to_lowercase())
                    .filter(|p| !p.is_empty()),
            )
            .collect();

        let email = Regex::new(EMAIL_PATTERN)?;

        let rules = vec![
            Rule {
                kind: PIIType::Phone,
                field_name: record::PHONE,
                matcher: ValueMatcher::Pattern(Regex::new(PHONE_PATTERN)?),
            },
            Rule {
                kind: PIIType::NationalId,
                field_name: record::AADHAR,
                matcher: ValueMatcher::Pattern(Regex::new(NATIONAL_ID_PATTERN)?),
            },
            Rule {
                kind: PIIType::Passport,
                field_name: record::PASSPORT,
                matcher: ValueMatcher::Pattern(Regex::new(PASSPORT_PATTERN)?),
            },
            Rule {
                kind: PIIType::Email,
                field_name: record::EMAIL,
                matcher: ValueMatcher::Pattern(email.clone()),
            },
            Rule {
                kind: PIIType::PaymentHandle,
                field_name: record::UPI_ID,
                matcher: ValueMatcher::PaymentHandle(providers),
            },
        ];

        Ok(Self { rules, email })
    }

    /// First rule that flags the field, in priority order
    pub fn classify(&self, field: &str, text: &str) -> Option<PIIType> {
        self.rules
            .iter()
            .find(|rule| rule.applies(field, text))
            .map(|rule| rule.kind)
    }

    /// Whether the text is a complete email address
    pub fn is_email(&self, text: &str) -> bool {
        self.email.is_match(text)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
