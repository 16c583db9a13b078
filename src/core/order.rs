use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::api::PledgeApi;
use super::constants::*;
use super::graphql::ApiError;
use super::router::Router;

/// Frequency offered by the form. Orders are sent without it; the
/// collective confirms the schedule when the pledge is fulfilled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interval {
    Monthly,
    Yearly,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Monthly => "monthly",
            Interval::Yearly => "yearly",
        }
    }
}

/// One entry of the frequency select
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyOption {
    pub label: &'static str,
    /// `None` is the one-time pledge
    pub value: Option<Interval>,
}

impl FrequencyOption {
    pub fn form_value(&self) -> &'static str {
        self.value.map(|interval| interval.as_str()).unwrap_or("")
    }
}

pub const FREQUENCY_OPTIONS: [FrequencyOption; 3] = [
    FrequencyOption { label: "Monthly", value: Some(Interval::Monthly) },
    FrequencyOption { label: "Yearly", value: Some(Interval::Yearly) },
    FrequencyOption { label: "One-Time", value: None },
];

pub const DEFAULT_INTERVAL: Interval = Interval::Monthly;

#[derive(Debug, Clone, PartialEq)]
pub enum PledgeError {
    NotLoggedIn,
    UnreadableForm(String),
    InvalidAmount(String),
    InvalidProfile(String),
    CollectiveNotResolved(String),
    Api(ApiError),
}

impl fmt::Display for PledgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PledgeError::NotLoggedIn => write!(f, "Sign up or login to create a pledge."),
            PledgeError::UnreadableForm(msg) => write!(f, "Could not read the pledge form: {}", msg),
            PledgeError::InvalidAmount(raw) => write!(f, "Invalid amount: {:?}", raw),
            PledgeError::InvalidProfile(raw) => write!(f, "Invalid profile: {:?}", raw),
            PledgeError::CollectiveNotResolved(slug) => write!(f, "Collective not found: {}", slug),
            PledgeError::Api(e) => write!(f, "{}", e),
        }
    }
}

impl From<ApiError> for PledgeError {
    fn from(e: ApiError) -> Self {
        PledgeError::Api(e)
    }
}

/// Raw field values of the submitted form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PledgeForm {
    pub name: String,
    pub slug: String,
    pub total_amount: String,
    /// Absent when the profile select was not rendered (logged out)
    pub from_collective: Option<String>,
    pub website: String,
    pub public_message: String,
}

impl PledgeForm {
    /// Collect the named fields through `lookup`, which returns the raw value
    /// of a form element or `None` when the form has no such element.
    pub fn from_fields<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |field: &str| lookup(field).unwrap_or_default();

        Self {
            name: text(FIELD_NAME),
            slug: text(FIELD_SLUG),
            total_amount: text(FIELD_TOTAL_AMOUNT),
            from_collective: lookup(FIELD_FROM_COLLECTIVE),
            website: text(FIELD_WEBSITE),
            public_message: text(FIELD_PUBLIC_MESSAGE),
        }
    }
}

/// Which collective the pledge goes to
#[derive(Clone, Debug, PartialEq)]
pub enum TargetCollective {
    /// No slug on the page: the form describes a new collective
    New,
    /// Slug given on the page; `id` once the lookup query answered
    Existing { slug: String, id: Option<u64> },
}

impl TargetCollective {
    pub fn from_slug(slug: Option<&str>) -> Self {
        match slug {
            Some(slug) => TargetCollective::Existing { slug: slug.to_string(), id: None },
            None => TargetCollective::New,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, TargetCollective::New)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CollectiveRef {
    Existing { id: u64 },
    New { name: String, slug: String, website: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PayerRef {
    pub id: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub collective: CollectiveRef,
    pub from_collective: PayerRef,
    /// Minor currency units
    pub total_amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_message: Option<String>,
}

/// Convert a display amount ("20", "12.5") into minor units.
///
/// Fractions below one minor unit are truncated.
pub fn amount_to_minor_units(raw: &str) -> Result<i64, PledgeError> {
    let invalid = || PledgeError::InvalidAmount(raw.to_string());

    let amount = Decimal::from_str(raw.trim()).map_err(|_| invalid())?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(invalid());
    }

    amount
        .checked_mul(Decimal::from(MINOR_UNITS_PER_UNIT))
        .map(|minor| minor.trunc())
        .and_then(|minor| minor.to_i64())
        .ok_or_else(invalid)
}

/// Shape the createOrder payload from the submitted form.
pub fn build_order(form: &PledgeForm, target: &TargetCollective) -> Result<OrderRequest, PledgeError> {
    let profile = form.from_collective.as_deref().ok_or(PledgeError::NotLoggedIn)?;
    let payer_id = profile
        .trim()
        .parse::<u64>()
        .map_err(|_| PledgeError::InvalidProfile(profile.to_string()))?;

    let collective = match target {
        TargetCollective::Existing { id: Some(id), .. } => CollectiveRef::Existing { id: *id },
        TargetCollective::Existing { slug, id: None } => {
            return Err(PledgeError::CollectiveNotResolved(slug.clone()));
        }
        TargetCollective::New => CollectiveRef::New {
            name: form.name.clone(),
            slug: form.slug.clone(),
            website: form.website.clone(),
        },
    };

    let public_message = Some(form.public_message.clone()).filter(|message| !message.is_empty());

    Ok(OrderRequest {
        collective,
        from_collective: PayerRef { id: payer_id },
        total_amount: amount_to_minor_units(&form.total_amount)?,
        public_message,
    })
}

/// Submit a pledge: build the order, run the mutation and open the
/// collective page on success. Returns the path navigated to, if any.
pub async fn submit_pledge<A, R>(
    api: &A,
    router: &R,
    form: &PledgeForm,
    target: &TargetCollective,
) -> Result<Option<String>, PledgeError>
where
    A: PledgeApi,
    R: Router,
{
    let order = build_order(form, target)?;
    let result = api.create_order(&order).await?;

    match result.collective_path() {
        Some(path) => {
            log::info!("Pledge {:?} created, opening {}", result.id, path);
            router.push_route(&path);
            Ok(Some(path))
        }
        None => {
            log::warn!("Pledge created but the collective has no slug");
            Ok(None)
        }
    }
}
