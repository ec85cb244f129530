use std::{fmt, str::FromStr};

use crate::ConfigurationError;

/// The Amazon marketplaces this tool can query, with their SP-API regional endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marketplace {
    Us,
    Ca,
    Mx,
    Br,
    Uk,
    De,
    Fr,
    It,
    Es,
    Jp,
    Au,
}

impl Marketplace {
    /// The marketplace identifier Amazon expects in the `MarketplaceIds` query parameter.
    pub fn marketplace_id(self) -> &'static str {
        match self {
            Self::Us => "ATVPDKIKX0DER",
            Self::Ca => "A2EUQ1WTGCTBG2",
            Self::Mx => "A1AM78C64UM0Y8",
            Self::Br => "A2Q3Y263D00KWC",
            Self::Uk => "A1F83G8C2ARO7P",
            Self::De => "A1PA6795UKMFR9",
            Self::Fr => "A13V1IB3VIYZZH",
            Self::It => "APJ6JRA9NG5V4",
            Self::Es => "A1RKKUPIHCS9HS",
            Self::Jp => "A1VC38T7YXB528",
            Self::Au => "A39IBJ37TRP1C6",
        }
    }

    /// Base URL of the regional SP-API endpoint serving this marketplace.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Us | Self::Ca | Self::Mx | Self::Br => "https://sellingpartnerapi-na.amazon.com",
            Self::Uk | Self::De | Self::Fr | Self::It | Self::Es => "https://sellingpartnerapi-eu.amazon.com",
            Self::Jp | Self::Au => "https://sellingpartnerapi-fe.amazon.com",
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Us => "US",
            Self::Ca => "CA",
            Self::Mx => "MX",
            Self::Br => "BR",
            Self::Uk => "UK",
            Self::De => "DE",
            Self::Fr => "FR",
            Self::It => "IT",
            Self::Es => "ES",
            Self::Jp => "JP",
            Self::Au => "AU",
        };
        f.write_str(code)
    }
}

impl FromStr for Marketplace {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "US" => Ok(Self::Us),
            "CA" => Ok(Self::Ca),
            "MX" => Ok(Self::Mx),
            "BR" => Ok(Self::Br),
            "UK" | "GB" => Ok(Self::Uk),
            "DE" => Ok(Self::De),
            "FR" => Ok(Self::Fr),
            "IT" => Ok(Self::It),
            "ES" => Ok(Self::Es),
            "JP" => Ok(Self::Jp),
            "AU" => Ok(Self::Au),
            other => Err(ConfigurationError(format!(
                "{other} is not a supported marketplace. Use one of US, CA, MX, BR, UK, DE, FR, IT, ES, JP, AU."
            ))),
        }
    }
}
