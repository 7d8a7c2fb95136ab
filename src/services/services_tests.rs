//! Tests for the per-endpoint services: parameter encoding, paths and
//! error mapping.

use std::sync::Arc;

use serde_json::json;

use crate::error::Error;
use crate::resources::Metadata;
use crate::testing::{body_text, header_value, MockClient};
use crate::time::InstantSleeper;
use crate::{ClientConfig, TahsilatClient};

use super::*;

const KEY: &str = "sk_test_abc123";

async fn client_with(mock: Arc<MockClient>) -> TahsilatClient<Arc<MockClient>, InstantSleeper> {
    TahsilatClient::with_transport(
        KEY,
        ClientConfig::new().with_skip_token_fetch(true),
        mock,
        InstantSleeper,
    )
    .await
    .expect("construction with skip_token_fetch performs no network calls")
}

fn created(data: serde_json::Value) -> Arc<MockClient> {
    Arc::new(MockClient::json(200, &json!({ "status": true, "data": data })))
}

mod param_serialization {
    use super::*;

    #[test]
    fn customer_metadata_serializes_to_ordered_pairs() {
        let params = CreateCustomerParams::new()
            .with_name("Ada")
            .with_metadata(Metadata::new().with("order_id", "123"));

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Ada",
                "metadata": [{ "key": "order_id", "value": "123" }],
            })
        );
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let params = CreateCustomerParams::new().with_email("a@b.co");
        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(value, json!({ "email": "a@b.co" }));
    }

    #[test]
    fn payment_products_serialize_to_a_json_string() {
        let params = CreatePaymentParams::new(10_000, "TRY", "https://example.com/cb")
            .with_product(PaymentProduct::new("Gift Card", 10_000).with_quantity(2));

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value["products"],
            json!(r#"[{"product_name":"Gift Card","price":10000,"quantity":2}]"#)
        );
        assert_eq!(value["amount"], json!(10_000));
    }

    #[test]
    fn product_metadata_uses_the_pair_list_convention() {
        let params = CreateProductParams::new()
            .with_name("Gift Card")
            .with_price(10_000)
            .with_metadata(Metadata::new().with("sku", "GC-100"));

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value["metadata"],
            json!([{ "key": "sku", "value": "GC-100" }])
        );
    }

    #[test]
    fn refund_omits_absent_amount() {
        let full = RefundParams::new(42);
        assert_eq!(
            serde_json::to_value(&full).unwrap(),
            json!({ "transaction_id": 42 })
        );

        let partial = RefundParams::new(42)
            .with_amount(5_000)
            .with_description("duplicate charge");
        assert_eq!(
            serde_json::to_value(&partial).unwrap(),
            json!({
                "transaction_id": 42,
                "amount": 5_000,
                "description": "duplicate charge",
            })
        );
    }
}

mod dispatch {
    use super::*;

    #[tokio::test]
    async fn customer_create_posts_form_encoded_pairs() {
        let mock = created(json!({ "id": 42, "name": "Ada" }));
        let client = client_with(mock.clone()).await;

        let customer = client
            .customers()
            .create(
                CreateCustomerParams::new()
                    .with_name("Ada")
                    .with_metadata(Metadata::new().with("order_id", "123")),
            )
            .await
            .unwrap();

        assert_eq!(customer.id, Some(42));

        let request = &mock.captured_requests()[0];
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.url.path(), "/v1/customers");
        assert_eq!(
            header_value(request, "Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            header_value(request, "Authorization"),
            Some(format!("Bearer {KEY}").as_str())
        );
        assert_eq!(header_value(request, "Accept-Language"), Some("tr"));

        let body = body_text(request);
        assert!(body.contains("metadata%5B0%5D%5Bkey%5D=order_id"));
        assert!(body.contains("metadata%5B0%5D%5Bvalue%5D=123"));
        assert!(body.contains("name=Ada"));
    }

    #[tokio::test]
    async fn payment_create_encodes_products_as_json_string() {
        let mock = created(json!({
            "payment_page_url": "https://pay.tahsilat.com/p/1",
            "transaction_id": 7,
        }));
        let client = client_with(mock.clone()).await;

        let payment = client
            .payments()
            .create_3ds(
                CreatePaymentParams::new(10_000, "TRY", "https://example.com/cb")
                    .with_product(PaymentProduct::new("Gift Card", 10_000)),
            )
            .await
            .unwrap();

        assert_eq!(
            payment.payment_page_url.as_deref(),
            Some("https://pay.tahsilat.com/p/1")
        );

        let request = &mock.captured_requests()[0];
        assert_eq!(request.url.path(), "/v1/payment/3ds");

        let expected_json =
            serde_json::to_string(&vec![PaymentProduct::new("Gift Card", 10_000)]).unwrap();
        let expected_fragment =
            format!("products={}", urlencoding::encode(&expected_json));
        assert!(
            body_text(request).contains(&expected_fragment),
            "body {:?} missing {expected_fragment:?}",
            body_text(request)
        );
    }

    #[tokio::test]
    async fn product_create_posts_to_products() {
        let mock = created(json!({ "id": 3, "product_name": "Gift Card" }));
        let client = client_with(mock.clone()).await;

        let product = client
            .products()
            .create(
                CreateProductParams::new()
                    .with_name("Gift Card")
                    .with_price(10_000)
                    .with_metadata(Metadata::new().with("sku", "GC-100")),
            )
            .await
            .unwrap();

        assert_eq!(product.id, Some(3));

        let request = &mock.captured_requests()[0];
        assert_eq!(request.url.path(), "/v1/products");

        let body = body_text(request);
        assert!(body.contains("metadata%5B0%5D%5Bkey%5D=sku"));
        assert!(body.contains("metadata%5B0%5D%5Bvalue%5D=GC-100"));
    }

    #[tokio::test]
    async fn transaction_retrieve_builds_the_id_path() {
        let mock = created(json!({
            "transaction_id": 78_810_412_652_494_i64,
            "payment_status": 1,
            "transaction_status": 2,
        }));
        let client = client_with(mock.clone()).await;

        let transaction = client
            .transactions()
            .retrieve(78_810_412_652_494_i64)
            .await
            .unwrap();

        assert!(transaction.is_success());
        let request = &mock.captured_requests()[0];
        assert_eq!(request.method, http::Method::GET);
        assert_eq!(request.url.path(), "/v1/transaction/78810412652494");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn transaction_retrieve_rejects_empty_id_before_any_network_call() {
        let mock = Arc::new(MockClient::new(Vec::new()));
        let client = client_with(mock.clone()).await;

        let result = client.transactions().retrieve("  ").await;

        assert!(matches!(result, Err(Error::InvalidRequest(_))));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn transaction_not_found_maps_to_invalid_request_with_id() {
        let mock = Arc::new(MockClient::json(
            404,
            &json!({ "status": false, "message": "not found", "error_code": 2004 }),
        ));
        let client = client_with(mock.clone()).await;

        let result = client.transactions().retrieve(999).await;

        match result {
            Err(Error::InvalidRequest(error)) => {
                assert!(error.message.contains("999"));
                assert_eq!(error.http_status, 404);
            }
            other => panic!("expected invalid request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transaction_not_found_code_on_ok_status_also_maps() {
        // Some gateway variants report 2004 with HTTP 200.
        let mock = Arc::new(MockClient::json(
            200,
            &json!({ "status": false, "message": "not found", "error_code": 2004 }),
        ));
        let client = client_with(mock.clone()).await;

        let result = client.transactions().retrieve(999).await;

        match result {
            Err(Error::InvalidRequest(error)) => {
                assert!(error.message.contains("999"));
                assert_eq!(error.http_status, 404);
            }
            other => panic!("expected invalid request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn refund_posts_to_transaction_refund() {
        let mock = created(json!({ "transaction_id": 42, "amount": 5_000 }));
        let client = client_with(mock.clone()).await;

        let refund = client
            .transactions()
            .refund(RefundParams::new(42).with_amount(5_000))
            .await
            .unwrap();

        assert_eq!(refund.transaction_id, Some(42));
        assert_eq!(
            mock.captured_requests()[0].url.path(),
            "/v1/transaction/refund"
        );
    }

    #[tokio::test]
    async fn resolve_pre_auth_posts_to_its_endpoint() {
        let mock = created(json!({ "transaction_id": 42 }));
        let client = client_with(mock.clone()).await;

        client
            .transactions()
            .resolve_pre_auth(ResolvePreAuthParams::new(42))
            .await
            .unwrap();

        assert_eq!(
            mock.captured_requests()[0].url.path(),
            "/v1/transaction/resolve-pre-auth"
        );
    }

    #[tokio::test]
    async fn commission_search_sends_filters_as_query() {
        let mock = created(json!({ "merchant_id": 7, "commission_rate": 1.89 }));
        let client = client_with(mock.clone()).await;

        let commission = client
            .commissions()
            .search(
                CommissionSearchParams::new()
                    .with_merchant_id(7)
                    .with_installment(1),
            )
            .await
            .unwrap();

        assert_eq!(commission.merchant_id, Some(7));

        let request = &mock.captured_requests()[0];
        assert_eq!(request.url.path(), "/v1/pos/commissions");
        assert_eq!(request.url.query(), Some("installment=1&merchant_id=7"));
    }

    #[tokio::test]
    async fn bin_lookup_sends_the_bin_as_query() {
        let mock = created(json!({ "bank_name": "Ziraat", "card_type": "credit" }));
        let client = client_with(mock.clone()).await;

        let lookup = client
            .bin_lookup()
            .detail(BinLookupParams::new("48945540"))
            .await
            .unwrap();

        assert_eq!(lookup.bank_name.as_deref(), Some("Ziraat"));

        let request = &mock.captured_requests()[0];
        assert_eq!(request.url.path(), "/v1/bin-lookup");
        assert_eq!(request.url.query(), Some("bin_number=48945540"));
    }

    #[tokio::test]
    async fn token_fetch_uses_the_key_and_json_content_type() {
        let mock = Arc::new(MockClient::new(vec![Ok(
            crate::testing::token_response("tok_fresh"),
        )]));
        let client = client_with(mock.clone()).await;

        let token = client.tokens().fetch().await.unwrap();
        assert_eq!(token.access_token.as_deref(), Some("tok_fresh"));
        assert_eq!(token.supports_3d, Some(true));

        let request = &mock.captured_requests()[0];
        assert_eq!(request.url.path(), "/v1/token/get-token");
        assert_eq!(
            header_value(request, "Content-Type"),
            Some("application/json")
        );
        assert_eq!(
            header_value(request, "Authorization"),
            Some(format!("Bearer {KEY}").as_str())
        );
        assert!(request.body.is_none());
    }
}
