//! The fixed set of categories a transaction can be filed under.
//!
//! This is the only place the list is defined. The entry form, the form
//! validation and the sample data all read [Category::ALL].

use std::{fmt::Display, str::FromStr};

/// A household budget category.
///
/// The storage layer keeps the category as free text, so rows written by
/// other tools may hold labels outside this set. New rows are only ever
/// created from a [Category].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Rent, mortgage and other housing costs.
    Housing,
    /// Groceries and eating out.
    Food,
    /// Insurance premiums and taxes.
    InsuranceAndTaxes,
    /// The electricity bill.
    Electricity,
    /// The gas bill.
    Gas,
    /// The water bill.
    Water,
    /// Entertaining and gifts.
    Socializing,
    /// Phone and internet.
    Communication,
    /// Sundries.
    Miscellaneous,
    /// Anything that does not fit elsewhere.
    Other,
}

impl Category {
    /// Every category, in the order they are offered on the entry form.
    pub const ALL: [Category; 10] = [
        Category::Housing,
        Category::Food,
        Category::InsuranceAndTaxes,
        Category::Electricity,
        Category::Gas,
        Category::Water,
        Category::Socializing,
        Category::Communication,
        Category::Miscellaneous,
        Category::Other,
    ];

    /// The label stored in the database and shown to the user.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Housing => "住居費",
            Category::Food => "食費",
            Category::InsuranceAndTaxes => "保険・税金",
            Category::Electricity => "電気",
            Category::Gas => "ガス",
            Category::Water => "水道",
            Category::Socializing => "交際費",
            Category::Communication => "通信費",
            Category::Miscellaneous => "雑費",
            Category::Other => "その他",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when a label is not one of the known categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a known category")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == label)
            .ok_or_else(|| UnknownCategory(label.to_owned()))
    }
}
