// Call-center endpoints
//
// Pre-call profile lookup, post-call outcome submission, and the
// per-customer interaction log. The trailing slashes on the first two
// paths are significant to the backend router.

use crate::ApiClient;
use crate::error::Error;
use crate::types::{
    CallOutcomePayload, InteractionFields, InteractionRecord, PostCallResponse, PreCallResponse,
    RawId,
};

impl ApiClient {
    /// Look up the caller's profile by phone number before the call connects.
    pub async fn fetch_user_profile_pre_call(
        &self,
        caller_number: &str,
    ) -> Result<PreCallResponse, Error> {
        self.get_with_params(
            &["fetch_user_profile_pre_call", ""],
            &[("caller_number", caller_number)],
        )
        .await
    }

    pub async fn post_call_outcomes(
        &self,
        payload: &CallOutcomePayload,
    ) -> Result<PostCallResponse, Error> {
        self.post(&["post_call_outcomes", ""], payload).await
    }

    pub async fn list_interactions(
        &self,
        customer_id: &RawId,
    ) -> Result<Vec<InteractionRecord>, Error> {
        self.get(&["customers", &customer_id.to_string(), "interactions"])
            .await
    }

    pub async fn create_interaction(
        &self,
        customer_id: &RawId,
        fields: &InteractionFields,
    ) -> Result<InteractionRecord, Error> {
        self.post(&["customers", &customer_id.to_string(), "interactions"], fields)
            .await
    }
}
