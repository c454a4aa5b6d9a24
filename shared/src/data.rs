use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};

/// The datasets the upstream registry can be queried for. The variant is sent as the `type` query
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Vin,
    Restrict,
    GibddV2,
    Wanted,
    Dtp,
    Fines,
    Eaisto,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Vin,
        Resource::Restrict,
        Resource::GibddV2,
        Resource::Wanted,
        Resource::Dtp,
        Resource::Fines,
        Resource::Eaisto,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Vin => "vin",
            Resource::Restrict => "restrict",
            Resource::GibddV2 => "gibddv2",
            Resource::Wanted => "wanted",
            Resource::Dtp => "dtp",
            Resource::Fines => "fines",
            Resource::Eaisto => "eaisto",
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The upstream sends `null` for lists it has nothing for. We treat that the same as an empty list.
fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scalars may come back as `null` as well. Those read as zero or false.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Text {
    String(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

/// Text fields such as years, odometer readings or codes are sometimes sent as bare numbers.
fn free_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Text>::deserialize(deserializer)?.map(|text| match text {
        Text::String(value) => value,
        Text::Integer(value) => value.to_string(),
        Text::Unsigned(value) => value.to_string(),
        Text::Float(value) => value.to_string(),
        Text::Bool(value) => value.to_string(),
    }))
}

// type=vin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GibddResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub found: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub utilicazia: i32,
    #[serde(deserialize_with = "free_text")]
    pub utilicaziainfo: Option<String>,
    pub vehicle: Option<Vehicle>,
    pub vehicle_passport: Option<VehiclePassport>,
    #[serde(deserialize_with = "nullable_list")]
    pub ownership_period: Vec<OwnershipPeriod>,
    pub inquiry: Option<Inquiry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(deserialize_with = "free_text")]
    pub vin: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub body_number: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub engine_number: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub model: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub color: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub year: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub engine_volume: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub power_hp: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub power_kwt: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub category: Option<String>,
    #[serde(rename = "type", deserialize_with = "free_text")]
    pub vehicle_type: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub typeinfo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehiclePassport {
    #[serde(deserialize_with = "free_text")]
    pub number: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OwnershipPeriod {
    #[serde(deserialize_with = "free_text")]
    pub last_operation: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub last_operation_info: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub simple_person_type: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub simple_person_type_info: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub from: Option<String>,
    // None while the period is ongoing.
    #[serde(deserialize_with = "free_text")]
    pub to: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub period: Option<String>,
}

/// Billing information about the request itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inquiry {
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub balance: f64,
    #[serde(deserialize_with = "free_text")]
    pub credit: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub speed: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub attempts: i32,
}

// type=restrict
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestrictResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub found: bool,
    #[serde(deserialize_with = "nullable_list")]
    pub restrictions: Vec<Restriction>,
}

impl RestrictResponse {
    #[must_use]
    pub fn has_restriction(&self) -> bool {
        !self.restrictions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restriction {
    #[serde(deserialize_with = "free_text")]
    pub osn: Option<String>,     // reason
    #[serde(deserialize_with = "free_text")]
    pub ogrkod: Option<String>,  // restriction code
    #[serde(deserialize_with = "free_text")]
    pub regname: Option<String>, // issuing authority
    #[serde(deserialize_with = "free_text")]
    pub ogrdate: Option<String>,
}

// type=gibddv2
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GibddV2Response {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub found: bool,
}

// type=wanted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WantedResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub found: bool,
    #[serde(deserialize_with = "nullable_list")]
    pub records: Vec<WantedRecord>,
}

impl WantedResponse {
    #[must_use]
    pub fn is_wanted(&self) -> bool {
        !self.records.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WantedRecord {
    #[serde(deserialize_with = "free_text")]
    pub regname: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub reason: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub date: Option<String>,
}

// type=dtp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DtpResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub found: bool,
    #[serde(deserialize_with = "nullable_list")]
    pub accidents: Vec<Accident>,
}

impl DtpResponse {
    #[must_use]
    pub fn has_accidents(&self) -> bool {
        !self.accidents.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Accident {
    #[serde(deserialize_with = "free_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub region: Option<String>,
    #[serde(rename = "type", deserialize_with = "free_text")]
    pub accident_type: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub damage: Option<String>,
}

// type=fines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinesResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub found: bool,
    #[serde(deserialize_with = "nullable_list")]
    pub fines: Vec<Fine>,
}

impl FinesResponse {
    #[must_use]
    pub fn has_fines(&self) -> bool {
        !self.fines.is_empty()
    }

    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.fines.iter().map(|fine| fine.amount).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fine {
    #[serde(deserialize_with = "free_text")]
    pub article: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub number: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(deserialize_with = "free_text")]
    pub status: Option<String>,
}

// type=eaisto
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EaistoResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub found: bool,
    #[serde(deserialize_with = "nullable_list")]
    pub records: Vec<InspectionRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionRecord {
    #[serde(deserialize_with = "free_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub result: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub odometer: Option<String>,
    #[serde(deserialize_with = "free_text")]
    pub station: Option<String>,
}

/// Whatever sub-responses could be retrieved for a vehicle. `None` means that lookup produced no
/// data.
#[derive(Debug, Clone, Default)]
pub struct ReportParts {
    pub gibdd: Option<GibddResponse>,
    pub restrict: Option<RestrictResponse>,
    pub gibddv2: Option<GibddV2Response>,
    pub wanted: Option<WantedResponse>,
    pub dtp: Option<DtpResponse>,
    pub fines: Option<FinesResponse>,
    pub eaisto: Option<EaistoResponse>,
}

/// Everything known about a vehicle, merged from all lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VinReport {
    pub gibdd: Option<GibddResponse>,
    pub restrict: Option<RestrictResponse>,
    pub gibddv2: Option<GibddV2Response>,
    pub wanted: Option<WantedResponse>,
    pub dtp: Option<DtpResponse>,
    pub fines: Option<FinesResponse>,
    pub eaisto: Option<EaistoResponse>,

    pub owners_count: usize,
    pub has_restriction: bool,
    pub is_wanted: bool,
    pub has_accidents: bool,
    pub has_fines: bool,
    pub fines_amount: f64,
}

impl VinReport {
    /// Combines the sub-responses into a report and derives the summary fields from them.
    #[must_use]
    pub fn assemble(parts: ReportParts) -> Self {
        let ReportParts {
            gibdd,
            restrict,
            gibddv2,
            wanted,
            dtp,
            fines,
            eaisto,
        } = parts;

        Self {
            owners_count: gibdd.as_ref().map_or(0, |g| g.ownership_period.len()),
            has_restriction: restrict.as_ref().is_some_and(RestrictResponse::has_restriction),
            is_wanted: wanted.as_ref().is_some_and(WantedResponse::is_wanted),
            has_accidents: dtp.as_ref().is_some_and(DtpResponse::has_accidents),
            has_fines: fines.as_ref().is_some_and(FinesResponse::has_fines),
            fines_amount: fines.as_ref().map_or(0.0, FinesResponse::total_amount),
            gibdd,
            restrict,
            gibddv2,
            wanted,
            dtp,
            fines,
            eaisto,
        }
    }
}
