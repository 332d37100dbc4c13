//! Hosted checkout links.
//!
//! The pricing page sends buyers to Creem's hosted checkout with their email
//! prefilled, so the webhook that follows can be matched back to the account.

use reqwest::Url;

use crate::domain::foundation::{EmailAddress, ValidationError};

/// Builds the hosted checkout URL for `product_id`.
///
/// `{base_url}/{product_id}?customer_email=…[&success_url=…]`
pub fn checkout_url(
    base_url: &str,
    product_id: &str,
    email: &EmailAddress,
    success_url: Option<&str>,
) -> Result<Url, ValidationError> {
    if product_id.trim().is_empty() {
        return Err(ValidationError::empty_field("product_id"));
    }

    let path = format!("{}/{}", base_url.trim_end_matches('/'), product_id.trim());
    let mut params = vec![("customer_email", email.as_str())];
    if let Some(success_url) = success_url {
        params.push(("success_url", success_url));
    }

    Url::parse_with_params(&path, &params)
        .map_err(|e| ValidationError::invalid_format("checkout_base_url", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> EmailAddress {
        EmailAddress::parse("Jane+pro@Example.com").unwrap()
    }

    #[test]
    fn builds_url_with_encoded_query() {
        let url = checkout_url(
            "https://www.creem.io/test/payment/",
            "prod_4WeSl7nk5ZvdJJFGuw6e1m",
            &email(),
            Some("https://app.example.com/payment-success"),
        )
        .unwrap();

        assert_eq!(url.path(), "/test/payment/prod_4WeSl7nk5ZvdJJFGuw6e1m");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("customer_email".to_string(), "jane+pro@example.com".to_string()),
                (
                    "success_url".to_string(),
                    "https://app.example.com/payment-success".to_string()
                ),
            ]
        );
        assert!(url.as_str().contains("jane%2Bpro%40example.com"));
    }

    #[test]
    fn success_url_is_optional() {
        let url = checkout_url("https://www.creem.io/payment", "prod_1", &email(), None).unwrap();
        assert_eq!(url.query_pairs().count(), 1);
    }

    #[test]
    fn empty_product_is_rejected() {
        let result = checkout_url("https://www.creem.io/payment", " ", &email(), None);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = checkout_url("not a url", "prod_1", &email(), None);
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }
}
