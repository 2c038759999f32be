use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stored product.
///
/// `buying_price` is kept in storage but never leaves the service in a
/// response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: i32,
    #[serde(skip_serializing, default)]
    pub buying_price: i32,
}

/// Product payload accepted by create and update.
///
/// On update the `id` selects the row to overwrite; on create it is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    #[validate(length(min = 3, max = 20, message = "name must be between 3 and 20 characters"))]
    #[schema(min_length = 3, max_length = 20, example = "Smartphone")]
    pub name: String,

    #[validate(range(min = 1, message = "price must be at least 1"))]
    #[schema(minimum = 1, example = 499)]
    pub price: i32,

    #[serde(default)]
    pub buying_price: i32,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            buying_price: 0,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_buying_price(mut self, buying_price: i32) -> Self {
        self.buying_price = buying_price;
        self
    }
}

impl From<Product> for ProductInput {
    fn from(product: Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name,
            price: product.price,
            buying_price: product.buying_price,
        }
    }
}

/// How name searches compare the stored name against the fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameMatch {
    /// SQL `LIKE`
    #[default]
    CaseSensitive,
    /// Postgres `ILIKE`
    CaseInsensitive,
}

impl NameMatch {
    pub fn from_case_insensitive(case_insensitive: bool) -> Self {
        if case_insensitive {
            Self::CaseInsensitive
        } else {
            Self::CaseSensitive
        }
    }

    /// Evaluates `name LIKE '%fragment%'` (or `ILIKE`) the way Postgres does:
    /// `%` in the fragment matches any run of characters, `_` matches exactly
    /// one, and a backslash makes the next character literal.
    pub fn matches(&self, name: &str, fragment: &str) -> bool {
        match self {
            Self::CaseSensitive => like_contains(name, fragment),
            Self::CaseInsensitive => like_contains(&name.to_lowercase(), &fragment.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LikeToken {
    AnyRun,
    AnyChar,
    Literal(char),
}

fn like_tokens(fragment: &str) -> Vec<LikeToken> {
    // The fragment is always wrapped in `%...%`
    let mut tokens = vec![LikeToken::AnyRun];
    let mut chars = fragment.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::AnyRun,
            '_' => LikeToken::AnyChar,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            other => LikeToken::Literal(other),
        });
    }
    tokens.push(LikeToken::AnyRun);
    tokens
}

/// Greedy wildcard match with a single backtrack point per `%`.
fn like_contains(name: &str, fragment: &str) -> bool {
    let text: Vec<char> = name.chars().collect();
    let pattern = like_tokens(fragment);

    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(LikeToken::AnyRun) => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(LikeToken::AnyChar) => {
                t += 1;
                p += 1;
            }
            Some(LikeToken::Literal(c)) if *c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star, from)) => {
                    p = star + 1;
                    t = from + 1;
                    backtrack = Some((star, from + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|token| *token == LikeToken::AnyRun)
}
