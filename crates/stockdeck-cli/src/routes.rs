//! Client-side routes.
//!
//! | Path | Page |
//! |------|------|
//! | `/` | landing |
//! | `/stocks` | stock list |
//! | `/stocks-data/<instrument>` | price history |

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use stockdeck_core::{Symbol, ValidationError};

const STOCK_DATA_PREFIX: &str = "stocks-data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Stocks,
    StockData(Symbol),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Home => String::from("/"),
            Self::Stocks => String::from("/stocks"),
            Self::StockData(symbol) => format!("/{STOCK_DATA_PREFIX}/{symbol}"),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let unknown = || ValidationError::UnknownRoute {
            path: value.to_owned(),
        };

        let segments = value
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();

        match segments.as_slice() {
            [] => Ok(Self::Home),
            ["stocks"] => Ok(Self::Stocks),
            [STOCK_DATA_PREFIX, instrument] => Symbol::parse(instrument).map(Self::StockData),
            _ => Err(unknown()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_page() {
        assert_eq!("/".parse::<Route>(), Ok(Route::Home));
        assert_eq!("/stocks/".parse::<Route>(), Ok(Route::Stocks));
        assert_eq!(
            "/stocks-data/Hindalco".parse::<Route>(),
            Ok(Route::StockData(Symbol::parse("Hindalco").expect("valid")))
        );
    }

    #[test]
    fn paths_round_trip() {
        for path in ["/", "/stocks", "/stocks-data/TATASTEEL"] {
            let route = path.parse::<Route>().expect("known route");
            assert_eq!(route.path(), path);
        }
    }

    #[test]
    fn instruments_starting_with_digits_or_holding_spaces_are_routable() {
        for instrument in ["3MINDIA", "360ONE", "NIFTY 50"] {
            let path = format!("/stocks-data/{instrument}");
            let route = path.parse::<Route>().expect("listed instrument");
            assert_eq!(route, Route::StockData(Symbol::parse(instrument).expect("valid")));
            assert_eq!(route.path(), path);
        }
    }

    #[test]
    fn rejects_unknown_paths() {
        assert!(matches!(
            "/dashboard".parse::<Route>(),
            Err(ValidationError::UnknownRoute { .. })
        ));
        assert!(matches!(
            "/stocks-data".parse::<Route>(),
            Err(ValidationError::UnknownRoute { .. })
        ));
        assert!(matches!(
            "/stocks-data/HINDALCO/extra".parse::<Route>(),
            Err(ValidationError::UnknownRoute { .. })
        ));
    }
}
