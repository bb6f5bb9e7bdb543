//! Item catalogue.
//!
//! The catalogue is the read-only table every chromosome is indexed
//! against: gene `i` always refers to item `i`.

use crate::error::GaError;

/// One entry of the catalogue.
///
/// `max_count` is only meaningful for the bounded-quantity variant; when
/// absent the item can be taken at most once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub cost: f64,
    pub profit: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_count: Option<u32>,
}

impl Item {
    /// Creates a boolean-variant item (at most one copy).
    pub fn new(name: impl Into<String>, cost: f64, profit: f64) -> Self {
        Self {
            name: name.into(),
            cost,
            profit,
            max_count: None,
        }
    }

    /// Creates a bounded-variant item that can be taken up to `max_count` times.
    pub fn bounded(name: impl Into<String>, cost: f64, profit: f64, max_count: u32) -> Self {
        Self {
            name: name.into(),
            cost,
            profit,
            max_count: Some(max_count),
        }
    }

    /// Largest quantity a gene may hold for this item.
    pub fn bound(&self) -> u32 {
        self.max_count.unwrap_or(1)
    }
}

/// Immutable, ordered list of items.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    items: Vec<Item>,
}

impl Catalogue {
    /// Builds a catalogue, rejecting empty lists and items with negative or
    /// non-finite attributes.
    pub fn new(items: Vec<Item>) -> Result<Self, GaError> {
        if items.is_empty() {
            return Err(GaError::EmptyCatalogue);
        }
        for item in &items {
            if !item.cost.is_finite() || item.cost < 0.0 {
                return Err(GaError::InvalidItem {
                    name: item.name.clone(),
                    reason: format!("cost must be finite and non-negative, got {}", item.cost),
                });
            }
            if !item.profit.is_finite() || item.profit < 0.0 {
                return Err(GaError::InvalidItem {
                    name: item.name.clone(),
                    reason: format!(
                        "profit must be finite and non-negative, got {}",
                        item.profit
                    ),
                });
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Whether any item carries an explicit `max_count`.
    pub fn is_bounded(&self) -> bool {
        self.items.iter().any(|item| item.max_count.is_some())
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Suggested capacity for [`hiking`].
pub const HIKING_CAPACITY: f64 = 400.0;

/// Suggested capacity for [`cac40`].
pub const CAC40_CAPACITY: f64 = 15_000.0;

/// Classic 0/1 hiking knapsack: weight as cost, value as profit.
pub fn hiking() -> Catalogue {
    let rows: [(&str, f64, f64); 22] = [
        ("map", 9.0, 150.0),
        ("compass", 13.0, 35.0),
        ("water", 153.0, 200.0),
        ("sandwich", 50.0, 160.0),
        ("glucose", 15.0, 60.0),
        ("tin", 68.0, 45.0),
        ("banana", 27.0, 60.0),
        ("apple", 39.0, 40.0),
        ("cheese", 23.0, 30.0),
        ("beer", 52.0, 10.0),
        ("suntan cream", 11.0, 70.0),
        ("camera", 32.0, 30.0),
        ("t-shirt", 24.0, 15.0),
        ("trousers", 48.0, 10.0),
        ("umbrella", 73.0, 40.0),
        ("waterproof trousers", 42.0, 70.0),
        ("waterproof overclothes", 43.0, 75.0),
        ("note-case", 22.0, 80.0),
        ("sunglasses", 7.0, 20.0),
        ("towel", 18.0, 12.0),
        ("socks", 4.0, 50.0),
        ("book", 30.0, 10.0),
    ];
    Catalogue {
        items: rows
            .iter()
            .map(|&(name, cost, profit)| Item::new(name, cost, profit))
            .collect(),
    }
}

/// Bounded portfolio knapsack over CAC 40 shares: share price as cost,
/// expected gain as profit, and a per-share purchase limit.
pub fn cac40() -> Catalogue {
    let rows: [(&str, f64, f64, u32); 40] = [
        ("ACCOR", 32.0, 9.0, 60),
        ("AIR_LIQUIDE", 97.0, 7.0, 32),
        ("ALSTOM", 25.0, 5.0, 6),
        ("ARCELORMITTAL_REG", 12.0, 9.0, 43),
        ("AXA", 18.0, 2.0, 65),
        ("BNP_PARIBAS", 53.0, 3.0, 24),
        ("BOUYGUES", 25.0, 9.0, 38),
        ("CAP_GEMINI", 46.0, 1.0, 47),
        ("CARREFOUR", 27.0, 3.0, 37),
        ("CREDIT_AGRICOLE_SA", 8.0, 4.0, 99),
        ("DANONE", 51.0, 1.0, 43),
        ("EADS", 49.0, 6.0, 63),
        ("EDF", 26.0, 5.0, 87),
        ("ESSILOR_INTERNATIONAL", 73.0, 6.0, 49),
        ("GDF_SUEZ", 16.0, 1.0, 42),
        ("GEMALTO", 76.0, 2.0, 53),
        ("KERING", 150.0, 5.0, 97),
        ("L'OREAL", 126.0, 7.0, 100),
        ("LAFARGE", 49.0, 3.0, 93),
        ("LEGRAND_SA", 39.0, 2.0, 49),
        ("LVMH_MOET_VUITTON", 129.0, 9.0, 8),
        ("MICHELIN", 75.0, 4.0, 43),
        ("ORANGE", 8.0, 7.0, 1),
        ("PERNOD_RICARD", 80.0, 4.0, 53),
        ("PUBLICIS_GROUPE", 63.0, 11.0, 49),
        ("RENAULT", 58.0, 4.0, 32),
        ("SAFRAN", 47.0, 2.0, 61),
        ("SAINT_GOBAIN", 36.0, 7.0, 33),
        ("SANOFI", 73.0, 9.0, 70),
        ("SCHNEIDER_ELECTRIC", 58.0, 6.0, 21),
        ("SOCIETE_GENERALE", 40.0, 3.0, 93),
        ("SOLVAY", 108.0, 5.0, 33),
        ("STMICROELECTRONICS", 5.0, 1.0, 75),
        ("TECHNIP", 72.0, 3.0, 47),
        ("TOTAL", 42.0, 10.0, 95),
        ("UNIBAIL-RODAMCO", 184.0, 9.0, 82),
        ("VALLOUREC", 39.0, 4.0, 51),
        ("VEOLIA_ENVIRONNEMENT", 11.0, 10.0, 2),
        ("VINCI", 45.0, 6.0, 53),
        ("VIVENDI", 17.0, 5.0, 38),
    ];
    Catalogue {
        items: rows
            .iter()
            .map(|&(name, cost, profit, max)| Item::bounded(name, cost, profit, max))
            .collect(),
    }
}
