//! Navigation tokens carried in inline keyboard callback data.
//!
//! The whole browsing state lives in the token, so any screen can be rebuilt
//! from a token and fresh catalog data.

use std::fmt;
use std::str::FromStr;

use crate::catalog_errors::TokenError;

/// Where a button press should take the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationToken {
    /// `show_categories`
    Categories,
    /// `products:page:N`
    AllProducts { page: usize },
    /// `category:id:C:page:N`
    Category { category_id: i64, page: usize },
    /// `product:id:P`
    Product { product_id: i64 },
}

impl NavigationToken {
    /// Same listing, another page. Detail and menu tokens are returned unchanged.
    pub fn with_page(self, page: usize) -> Self {
        match self {
            NavigationToken::AllProducts { .. } => NavigationToken::AllProducts { page },
            NavigationToken::Category { category_id, .. } => {
                NavigationToken::Category { category_id, page }
            }
            other => other,
        }
    }
}

impl fmt::Display for NavigationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationToken::Categories => f.write_str("show_categories"),
            NavigationToken::AllProducts { page } => write!(f, "products:page:{page}"),
            NavigationToken::Category { category_id, page } => {
                write!(f, "category:id:{category_id}:page:{page}")
            }
            NavigationToken::Product { product_id } => write!(f, "product:id:{product_id}"),
        }
    }
}

impl FromStr for NavigationToken {
    type Err = TokenError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = data.split(':').collect();
        let malformed = || TokenError::Malformed(data.to_string());

        match parts.as_slice() {
            [""] => Err(TokenError::Empty),
            ["show_categories"] => Ok(NavigationToken::Categories),
            ["products", "page", page] => Ok(NavigationToken::AllProducts {
                page: parse_number(page)?,
            }),
            ["category", "id", category_id, "page", page] => Ok(NavigationToken::Category {
                category_id: parse_number(category_id)?,
                page: parse_number(page)?,
            }),
            ["product", "id", product_id] => Ok(NavigationToken::Product {
                product_id: parse_number(product_id)?,
            }),
            [command, ..] if is_known_command(command) => Err(malformed()),
            [command, ..] => Err(TokenError::UnknownCommand((*command).to_string())),
            [] => Err(TokenError::Empty),
        }
    }
}

fn is_known_command(command: &str) -> bool {
    matches!(command, "show_categories" | "products" | "category" | "product")
}

fn parse_number<T: FromStr>(value: &str) -> Result<T, TokenError> {
    value.parse().map_err(|_| TokenError::InvalidNumber {
        value: value.to_string(),
    })
}
