//! School identity shown in the site header

use serde::{Deserialize, Serialize};

/// First record of `/info`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeaderData {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub school_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub eiin: Option<u64>,
    #[serde(default)]
    pub school_code: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Header with resolved logo URL
#[derive(Debug, Clone, Serialize)]
pub struct HeaderView {
    pub logo_url: String,
    pub school_name: String,
    pub address: String,
    pub eiin: Option<u64>,
    pub school_code: Option<u64>,
    pub email: Option<String>,
    pub mobile_no: Option<String>,
    pub website: Option<String>,
}
