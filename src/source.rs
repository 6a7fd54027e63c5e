//! Source identity and destination naming

use serde::{Deserialize, Serialize};

/// The identity of a data source, selecting which fixed cleaning
/// pipeline applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Users,
    CardDetails,
    Stores,
    Products,
    Orders,
    DateEvents,
}

impl SourceKind {
    /// All source kinds, in load order
    pub const ALL: [SourceKind; 6] = [
        SourceKind::Users,
        SourceKind::CardDetails,
        SourceKind::Stores,
        SourceKind::Products,
        SourceKind::Orders,
        SourceKind::DateEvents,
    ];

    /// The destination table this source loads into
    pub fn destination(&self) -> &'static str {
        match self {
            SourceKind::Users => "dim_users",
            SourceKind::CardDetails => "dim_card_details",
            SourceKind::Stores => "dim_store_details",
            SourceKind::Products => "dim_products",
            SourceKind::Orders => "orders_table",
            SourceKind::DateEvents => "dim_date_times",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceKind::Users => "users",
            SourceKind::CardDetails => "card_details",
            SourceKind::Stores => "stores",
            SourceKind::Products => "products",
            SourceKind::Orders => "orders",
            SourceKind::DateEvents => "date_events",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "users" => Ok(SourceKind::Users),
            "card_details" | "cards" => Ok(SourceKind::CardDetails),
            "stores" => Ok(SourceKind::Stores),
            "products" => Ok(SourceKind::Products),
            "orders" => Ok(SourceKind::Orders),
            "date_events" | "dates" => Ok(SourceKind::DateEvents),
            _ => Err(format!("Unknown source kind: {}", s)),
        }
    }
}
