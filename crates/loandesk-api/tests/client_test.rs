#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use loandesk_api::types::{
    CallOutcomePayload, CustomerFields, DialingStatus, InteractionFields, LoanFields,
    OutcomeDetails, OutcomeMetadata,
};
use loandesk_api::{ApiClient, Error, RawId};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &format!("{}/api", server.uri()),
        &loandesk_api::TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

// ── Customers ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_customers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "first_name": "Ada", "last_name": "Lovelace", "email_address": "ada@example.com" },
            { "id": 2, "first_name": "Alan", "last_name": "Turing", "email": "alan@example.com", "phone": "555-0101" }
        ])))
        .mount(&server)
        .await;

    let customers = client.list_customers().await.unwrap();

    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].id, Some(RawId::Number(1)));
    assert_eq!(customers[0].email_address.as_deref(), Some("ada@example.com"));
    assert_eq!(customers[1].email.as_deref(), Some("alan@example.com"));
    assert_eq!(customers[1].phone.as_deref(), Some("555-0101"));
}

#[tokio::test]
async fn test_get_customer_with_embedded_loans() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/customers/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "first_name": "Grace",
            "last_name": "Hopper",
            "loans": [
                { "id": 70, "customer_id": 7, "product_name": "Auto Loan 60m", "status": "past_due", "due_amount": "412.80" }
            ]
        })))
        .mount(&server)
        .await;

    let customer = client.get_customer(&RawId::Number(7)).await.unwrap();
    let loans = customer.loans.unwrap();

    assert_eq!(customer.first_name.as_deref(), Some("Grace"));
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].status.as_deref(), Some("past_due"));
    assert_eq!(loans[0].due_amount, Some(412.8));
}

#[tokio::test]
async fn test_create_customer_sends_numeric_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/customers"))
        .and(body_partial_json(json!({
            "first_name": "Ada",
            "primary_phone_number": 5_551_234_567_i64,
            "ssn": null,
            "is_eligible_to_call": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 99, "first_name": "Ada", "primary_phone_number": 5_551_234_567_i64
        })))
        .mount(&server)
        .await;

    let fields = CustomerFields {
        account_number: "ACC-1".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email_address: "ada@example.com".into(),
        primary_phone_number: Some(5_551_234_567),
        record_type: "responsible_party".into(),
        is_eligible_to_call: true,
        ..CustomerFields::default()
    };
    let created = client.create_customer(&fields).await.unwrap();

    assert_eq!(created.id, Some(RawId::Number(99)));
    assert_eq!(created.primary_phone_number.as_deref(), Some("5551234567"));
}

#[tokio::test]
async fn test_update_customer() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/customers/5"))
        .and(body_partial_json(json!({ "city": "Atlanta" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 5, "first_name": "Ada", "city": "Atlanta" })),
        )
        .mount(&server)
        .await;

    let fields = CustomerFields {
        first_name: "Ada".into(),
        city: Some("Atlanta".into()),
        ..CustomerFields::default()
    };
    let updated = client
        .update_customer(&RawId::Number(5), &fields)
        .await
        .unwrap();

    assert_eq!(updated.city.as_deref(), Some("Atlanta"));
}

#[tokio::test]
async fn test_delete_customer_accepts_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/customers/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_customer(&RawId::Number(5)).await.unwrap();
}

#[tokio::test]
async fn test_text_ids_stay_inside_their_segment() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/customers/LN%2F7%3Fx%23y"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "LN/7?x#y" })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client
        .get_customer(&RawId::Text("LN/7?x#y".into()))
        .await
        .unwrap();
    assert_eq!(record.id, Some(RawId::Text("LN/7?x#y".into())));

    let err = client
        .get_customer(&RawId::Text("..".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPath(_)), "{err:?}");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

// ── Loans ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_loan_crud_paths() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/loans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "customer": "Ada Lovelace", "vehicle": "2019 Toyota Camry", "status": "active", "due_amount": 465.5 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/loans/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "term_months": "60" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/loans"))
        .and(body_partial_json(json!({ "customer_id": 3, "product_name": "Auto 48m" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 2, "customer_id": 3 })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/loans/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .mount(&server)
        .await;

    let loans = client.list_loans().await.unwrap();
    assert_eq!(loans[0].vehicle.as_deref(), Some("2019 Toyota Camry"));

    let loan = client.get_loan(&RawId::Number(1)).await.unwrap();
    assert_eq!(loan.term_months, Some(60));

    let fields = LoanFields {
        customer_id: Some(RawId::Number(3)),
        product_name: "Auto 48m".into(),
        status: "active".into(),
        ..LoanFields::default()
    };
    let created = client.create_loan(&fields).await.unwrap();
    assert_eq!(created.customer_id, Some(RawId::Number(3)));

    client.delete_loan(&RawId::Number(2)).await.unwrap();
}

// ── Dashboard ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_dashboard_stats() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_customers": 120,
            "total_loans": 140,
            "active_loans": 101,
            "past_due_loans": 12,
            "total_portfolio": 2_345_678.9
        })))
        .mount(&server)
        .await;

    let stats = client.dashboard_stats().await.unwrap();

    assert_eq!(stats.total_customers, Some(120));
    assert_eq!(stats.past_due_loans, Some(12));
    assert_eq!(stats.total_portfolio, Some(2_345_678.9));
}

// ── Call center ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_pre_call_lookup_sends_caller_number() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/fetch_user_profile_pre_call/"))
        .and(query_param("caller_number", "5551234567"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": "True",
            "caller_details": [
                { "user_info": { "first_name": "Ada", "due_amount": 412.8 } }
            ]
        })))
        .mount(&server)
        .await;

    let resp = client
        .fetch_user_profile_pre_call("5551234567")
        .await
        .unwrap();

    assert!(resp.success);
    assert_eq!(resp.caller_details.len(), 1);
    assert_eq!(resp.caller_details[0].user_info["first_name"], json!("Ada"));
}

#[tokio::test]
async fn test_pre_call_miss_with_null_details() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/fetch_user_profile_pre_call/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": "False",
            "caller_details": null
        })))
        .mount(&server)
        .await;

    let resp = client.fetch_user_profile_pre_call("5550000").await.unwrap();
    assert!(!resp.success);
    assert!(resp.caller_details.is_empty());
}

#[tokio::test]
async fn test_post_call_outcomes() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/post_call_outcomes/"))
        .and(body_partial_json(json!({
            "call_outcome_note": "will pay friday",
            "outcome_details": { "call_identifier": "CALL1700000000000" },
            "metadata": { "status": "Promise_to_Pay" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": "True" })))
        .mount(&server)
        .await;

    let payload = CallOutcomePayload {
        user_info: serde_json::Map::new(),
        outcome_details: OutcomeDetails {
            final_disposition: "Promise_to_Pay".into(),
            user_agreed_payment_amount: "200".into(),
            pay_later_date: "2024-03-01".into(),
            contact_type: "Phone".into(),
            call_duration: "00:05:30".into(),
            call_type: "OUTBOUND".into(),
            call_end_status: "Completed".into(),
            notes: "will pay friday".into(),
            update_date_time: "2023-11-14T22:13:20.000Z".into(),
            call_identifier: "CALL1700000000000".into(),
            dialing_status: DialingStatus {
                long_code: "Dialed - Answered".into(),
                short_code: "DAN".into(),
                details: "Customer contact successful".into(),
            },
        },
        call_outcome_note: "will pay friday".into(),
        metadata: OutcomeMetadata {
            creation_date: "2023-11-14T22:13:20.000Z".into(),
            source: "Phone".into(),
            status: "Promise_to_Pay".into(),
        },
    };
    let resp = client.post_call_outcomes(&payload).await.unwrap();

    assert!(resp.success);
}

#[tokio::test]
async fn test_interactions() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/customers/3/interactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "type": "Call", "status": "No Answer", "created_at": "2024-01-02T10:00:00Z" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/customers/3/interactions"))
        .and(body_partial_json(json!({ "type": "SMS", "status": "Sent" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": 2, "type": "SMS", "status": "Sent" })),
        )
        .mount(&server)
        .await;

    let list = client.list_interactions(&RawId::Number(3)).await.unwrap();
    assert_eq!(list[0].kind.as_deref(), Some("Call"));

    let fields = InteractionFields {
        kind: "SMS".into(),
        status: "Sent".into(),
        ..InteractionFields::default()
    };
    let created = client
        .create_interaction(&RawId::Number(3), &fields)
        .await
        .unwrap();
    assert_eq!(created.id, Some(RawId::Number(2)));
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn test_error_status_carries_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/customers"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "message": "Account number already exists" })),
        )
        .mount(&server)
        .await;

    let result = client.create_customer(&CustomerFields::default()).await;

    match result {
        Err(Error::Transport { status, message, .. }) => {
            assert_eq!(status, 409);
            assert_eq!(message.as_deref(), Some("Account number already exists"));
        }
        other => panic!("expected Transport error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_without_json_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/customers/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client.get_customer(&RawId::Number(404)).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.server_message(), None);
    assert_eq!(err.to_string(), "Request failed with status code 404");
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.dashboard_stats().await.unwrap_err();

    assert!(
        matches!(err, Error::Deserialization { .. }),
        "expected Deserialization error, got: {err:?}"
    );
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then release a port so nothing is listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base = format!("http://127.0.0.1:{port}/api");

    let client = ApiClient::from_reqwest(&base, reqwest::Client::new()).unwrap();
    let err = client.list_customers().await.unwrap_err();

    assert!(err.is_network(), "expected Network error, got: {err:?}");
    assert_eq!(err.server_message(), None);
}
