//! Customer-scoped client for the upstream mesh API.
//!
//! Profile and newsletter-subscription operations run with the signed-in
//! customer's access token, so every method takes the token explicitly.
//! These documents are small and change rarely, so they are issued as inline
//! query strings with serde response structs rather than codegen.

use std::sync::Arc;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::config::UpstreamConfig;
use crate::upstream::UpstreamError;
use crate::upstream::types::{NewsletterSubscription, Profile, ProfileUpdateInput};

// ─────────────────────────────────────────────────────────────────────────────
// GraphQL Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GraphQLRequest {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
}

impl<T> GraphQLResponse<T> {
    fn into_result(self) -> Result<T, UpstreamError> {
        if let Some(errors) = self.errors
            && !errors.is_empty()
        {
            let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
            return Err(UpstreamError::Api(messages.join("; ")));
        }

        self.data
            .ok_or_else(|| UpstreamError::Api("No data in response".to_string()))
    }
}

/// User error from a profile mutation.
#[derive(Debug, Deserialize)]
struct ProfileUserError {
    #[allow(dead_code)]
    field: Option<Vec<String>>,
    message: String,
    #[allow(dead_code)]
    code: Option<String>,
}

fn fold_user_errors(errors: Vec<ProfileUserError>) -> Result<(), UpstreamError> {
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
    Err(UpstreamError::UserError(messages.join(", ")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for customer-scoped operations on the upstream mesh.
#[derive(Clone)]
pub struct ProfileClient {
    inner: Arc<ProfileClientInner>,
}

struct ProfileClientInner {
    client: reqwest::Client,
    endpoint: String,
}

impl ProfileClient {
    /// Create a new profile client.
    #[must_use]
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            inner: Arc::new(ProfileClientInner {
                client: reqwest::Client::new(),
                endpoint: config.api_url.clone(),
            }),
        }
    }

    /// Execute a GraphQL document with the customer's access token.
    async fn query<T: DeserializeOwned>(
        &self,
        access_token: &str,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T, UpstreamError> {
        let request = GraphQLRequest {
            query: query.to_string(),
            variables,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("Authorization", format!("Bearer {access_token}"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api(format!(
                "Profile API request failed ({status}): {text}"
            )));
        }

        let gql_response: GraphQLResponse<T> = response.json().await?;
        gql_response.into_result()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Profile Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the signed-in customer's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn get_profile(&self, access_token: &str) -> Result<Profile, UpstreamError> {
        #[derive(Deserialize)]
        struct Response {
            profile: Profile,
        }

        const QUERY: &str = r"
            query getMyProfile {
                profile {
                    id
                    email
                    firstName
                    lastName
                    phone
                }
            }
        ";

        let response: Response = self.query(access_token, QUERY, None).await?;
        Ok(response.profile)
    }

    /// Update the signed-in customer's profile.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::UserError` when the mesh reports validation
    /// errors, and other variants when the request fails.
    pub async fn update_profile(
        &self,
        access_token: &str,
        input: ProfileUpdateInput,
    ) -> Result<Profile, UpstreamError> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(rename = "profileUpdate")]
            profile_update: ProfileUpdateResult,
        }

        #[derive(Deserialize)]
        struct ProfileUpdateResult {
            profile: Option<Profile>,
            #[serde(rename = "userErrors")]
            user_errors: Vec<ProfileUserError>,
        }

        const QUERY: &str = r"
            mutation updateMyProfile($input: ProfileUpdateInput!) {
                profileUpdate(input: $input) {
                    profile {
                        id
                        email
                        firstName
                        lastName
                        phone
                    }
                    userErrors {
                        field
                        message
                        code
                    }
                }
            }
        ";

        let variables = serde_json::json!({ "input": input });
        let response: Response = self.query(access_token, QUERY, Some(variables)).await?;

        fold_user_errors(response.profile_update.user_errors)?;

        response
            .profile_update
            .profile
            .ok_or_else(|| UpstreamError::Api("No profile returned".to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Newsletter Subscription Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get every marketing list together with the customer's membership.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn get_newsletter_subscriptions(
        &self,
        access_token: &str,
    ) -> Result<Vec<NewsletterSubscription>, UpstreamError> {
        #[derive(Deserialize)]
        struct Response {
            newsletters: Vec<NewsletterSubscription>,
        }

        const QUERY: &str = r"
            query getMyNewsletterSubscriptions {
                newsletters {
                    listId
                    name
                    subscribed
                }
            }
        ";

        let response: Response = self.query(access_token, QUERY, None).await?;
        Ok(response.newsletters)
    }

    /// Subscribe or unsubscribe the customer from a marketing list.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::UserError` for validation errors and other
    /// variants when the request fails.
    pub async fn set_newsletter_subscription(
        &self,
        access_token: &str,
        list_id: &str,
        subscribed: bool,
    ) -> Result<NewsletterSubscription, UpstreamError> {
        #[derive(Deserialize)]
        struct SubscribeResponse {
            #[serde(rename = "newsletterSubscribe")]
            result: SubscriptionResult,
        }

        #[derive(Deserialize)]
        struct UnsubscribeResponse {
            #[serde(rename = "newsletterUnsubscribe")]
            result: SubscriptionResult,
        }

        #[derive(Deserialize)]
        struct SubscriptionResult {
            newsletter: Option<NewsletterSubscription>,
            #[serde(rename = "userErrors")]
            user_errors: Vec<ProfileUserError>,
        }

        const SUBSCRIBE: &str = r"
            mutation subscribeToNewsletter($listId: String!) {
                newsletterSubscribe(listId: $listId) {
                    newsletter {
                        listId
                        name
                        subscribed
                    }
                    userErrors {
                        field
                        message
                        code
                    }
                }
            }
        ";

        const UNSUBSCRIBE: &str = r"
            mutation unsubscribeFromNewsletter($listId: String!) {
                newsletterUnsubscribe(listId: $listId) {
                    newsletter {
                        listId
                        name
                        subscribed
                    }
                    userErrors {
                        field
                        message
                        code
                    }
                }
            }
        ";

        let variables = serde_json::json!({ "listId": list_id });

        let result = if subscribed {
            let response: SubscribeResponse =
                self.query(access_token, SUBSCRIBE, Some(variables)).await?;
            response.result
        } else {
            let response: UnsubscribeResponse = self
                .query(access_token, UNSUBSCRIBE, Some(variables))
                .await?;
            response.result
        };

        fold_user_errors(result.user_errors)?;

        result
            .newsletter
            .ok_or_else(|| UpstreamError::Api("No newsletter returned".to_string()))
    }
}
