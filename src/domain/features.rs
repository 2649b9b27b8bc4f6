use std::fmt;

use serde::{ser::SerializeMap, Serialize, Serializer};

/// Columns of the phishing model, declared in the order the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureName {
    PctExtHyperlinks,
    PctExtResourceUrls,
    PctNullSelfRedirectHyperlinks,
    PctExtNullSelfRedirectHyperlinksRT,
    NumNumericChars,
    FrequentDomainNameMismatch,
    ExtMetaScriptLinkRT,
    NumDash,
    SubmitInfoToEmail,
    NumDots,
    PathLength,
    QueryLength,
    PathLevel,
    InsecureForms,
    UrlLength,
    NumSensitiveWords,
    NumQueryComponents,
    PctExtResourceUrlsRT,
    IframeOrFrame,
    HostnameLength,
    NumAmpersand,
    AbnormalExtFormActionR,
    UrlLengthRT,
    NumDashInHostname,
    IpAddress,
    AbnormalFormAction,
    EmbeddedBrandName,
}

pub const FEATURE_COUNT: usize = 27;

impl FeatureName {
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        Self::PctExtHyperlinks,
        Self::PctExtResourceUrls,
        Self::PctNullSelfRedirectHyperlinks,
        Self::PctExtNullSelfRedirectHyperlinksRT,
        Self::NumNumericChars,
        Self::FrequentDomainNameMismatch,
        Self::ExtMetaScriptLinkRT,
        Self::NumDash,
        Self::SubmitInfoToEmail,
        Self::NumDots,
        Self::PathLength,
        Self::QueryLength,
        Self::PathLevel,
        Self::InsecureForms,
        Self::UrlLength,
        Self::NumSensitiveWords,
        Self::NumQueryComponents,
        Self::PctExtResourceUrlsRT,
        Self::IframeOrFrame,
        Self::HostnameLength,
        Self::NumAmpersand,
        Self::AbnormalExtFormActionR,
        Self::UrlLengthRT,
        Self::NumDashInHostname,
        Self::IpAddress,
        Self::AbnormalFormAction,
        Self::EmbeddedBrandName,
    ];

    pub fn column(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PctExtHyperlinks => "PctExtHyperlinks",
            Self::PctExtResourceUrls => "PctExtResourceUrls",
            Self::PctNullSelfRedirectHyperlinks => "PctNullSelfRedirectHyperlinks",
            Self::PctExtNullSelfRedirectHyperlinksRT => "PctExtNullSelfRedirectHyperlinksRT",
            Self::NumNumericChars => "NumNumericChars",
            Self::FrequentDomainNameMismatch => "FrequentDomainNameMismatch",
            Self::ExtMetaScriptLinkRT => "ExtMetaScriptLinkRT",
            Self::NumDash => "NumDash",
            Self::SubmitInfoToEmail => "SubmitInfoToEmail",
            Self::NumDots => "NumDots",
            Self::PathLength => "PathLength",
            Self::QueryLength => "QueryLength",
            Self::PathLevel => "PathLevel",
            Self::InsecureForms => "InsecureForms",
            Self::UrlLength => "UrlLength",
            Self::NumSensitiveWords => "NumSensitiveWords",
            Self::NumQueryComponents => "NumQueryComponents",
            Self::PctExtResourceUrlsRT => "PctExtResourceUrlsRT",
            Self::IframeOrFrame => "IframeOrFrame",
            Self::HostnameLength => "HostnameLength",
            Self::NumAmpersand => "NumAmpersand",
            Self::AbnormalExtFormActionR => "AbnormalExtFormActionR",
            Self::UrlLengthRT => "UrlLengthRT",
            Self::NumDashInHostname => "NumDashInHostname",
            Self::IpAddress => "IpAddress",
            Self::AbnormalFormAction => "AbnormalFormAction",
            Self::EmbeddedBrandName => "EmbeddedBrandName",
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per [`FeatureName`]; every column starts at 0 so a record is never partial.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: [f64; FEATURE_COUNT],
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self {
            values: [0.0; FEATURE_COUNT],
        }
    }
}

impl FeatureRecord {
    pub fn get(&self, name: FeatureName) -> f64 {
        self.values[name.column()]
    }

    pub fn set(&mut self, name: FeatureName, value: f64) {
        self.values[name.column()] = value;
    }

    pub fn set_flag(&mut self, name: FeatureName, flag: bool) {
        self.set(name, if flag { 1.0 } else { 0.0 });
    }

    pub fn set_count(&mut self, name: FeatureName, count: usize) {
        self.set(name, count as f64);
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, f64)> + '_ {
        FeatureName::ALL
            .iter()
            .map(move |name| (*name, self.values[name.column()]))
    }

    /// The single tabular row handed to the classifier.
    pub fn to_row(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name.as_str(), &value)?;
        }
        map.end()
    }
}
