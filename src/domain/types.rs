use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpamLabel {
    #[serde(rename = "spam")]
    Spam,
    #[serde(rename = "not spam")]
    NotSpam,
}

impl SpamLabel {
    /// Class index 0 is the spam class of the trained model; every other index is ham.
    pub fn from_class(class: i64) -> Self {
        if class == 0 {
            Self::Spam
        } else {
            Self::NotSpam
        }
    }

    pub fn is_spam(self) -> bool {
        matches!(self, Self::Spam)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::NotSpam => "not spam",
        }
    }
}

impl fmt::Display for SpamLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhishingLabel {
    Phishing,
    Legitimate,
}

impl PhishingLabel {
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            Self::Phishing
        } else {
            Self::Legitimate
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phishing => "Phishing",
            Self::Legitimate => "Legitimate",
        }
    }
}

impl fmt::Display for PhishingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spam_class_zero_is_spam() {
        assert_eq!(SpamLabel::from_class(0), SpamLabel::Spam);
        assert_eq!(SpamLabel::from_class(1), SpamLabel::NotSpam);
        assert_eq!(SpamLabel::from_class(7), SpamLabel::NotSpam);
        assert_eq!(SpamLabel::NotSpam.to_string(), "not spam");
    }

    #[test]
    fn phishing_class_one_is_phishing() {
        assert_eq!(PhishingLabel::from_class(1).as_str(), "Phishing");
        assert_eq!(PhishingLabel::from_class(0).as_str(), "Legitimate");
        assert_eq!(PhishingLabel::from_class(-1), PhishingLabel::Legitimate);
    }
}
