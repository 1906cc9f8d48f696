
#[cfg(test)]
mod test {
    use crate::commons::{DefaultData, HttpGatewayMock, TestContext};
    use destination_relay::runner::{DestinationRunner, RunStatus};
    use serde_json::json;
    use serial_test::serial;
    use test_context::test_context;

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_return_one_outcome_per_destination(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        DefaultData::clear(ctx).await;

        let destination_1 = DefaultData::create_success_destination(ctx, ctx.owner_id, "GET").await;
        let destination_2 = DefaultData::create_failed_destination(ctx, ctx.owner_id).await;
        let destination_3 = DefaultData::create_success_destination(ctx, ctx.owner_id, "POST").await;

        HttpGatewayMock::mock_get_success(ctx, "/success").await;
        HttpGatewayMock::mock_post_success(ctx, "/success", &json!({})).await;
        HttpGatewayMock::mock_failed(ctx, "/failed").await;

        let batch_result = DestinationRunner::run_all(&ctx.app_state, ctx.owner_id, json!({})).await?;

        assert_eq!(3, batch_result.outcomes.len());
        assert_eq!(2, batch_result.successes());
        assert_eq!(1, batch_result.failures());

        // outcomes keep the store's listing order
        assert_eq!(destination_1.id, batch_result.outcomes[0].destination_id);
        assert_eq!(destination_2.id, batch_result.outcomes[1].destination_id);
        assert_eq!(destination_3.id, batch_result.outcomes[2].destination_id);

        assert_eq!(RunStatus::Success, batch_result.outcomes[0].status);
        assert_eq!(RunStatus::Failure, batch_result.outcomes[1].status);
        assert_eq!(RunStatus::Success, batch_result.outcomes[2].status);

        assert!(batch_result.outcomes[1].error.is_some());

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_isolate_transport_failures(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        DefaultData::clear(ctx).await;

        let unreachable = DefaultData::create_destination(ctx, ctx.owner_id, "http://127.0.0.1:1/hook", "GET", None).await;
        let reachable = DefaultData::create_success_destination(ctx, ctx.owner_id, "GET").await;

        HttpGatewayMock::mock_get_success(ctx, "/success").await;

        let batch_result = DestinationRunner::run_all(&ctx.app_state, ctx.owner_id, json!({})).await?;

        assert_eq!(2, batch_result.outcomes.len());

        let unreachable_outcome = batch_result.outcomes.iter().find(|it| it.destination_id == unreachable.id).unwrap();
        assert_eq!(RunStatus::Failure, unreachable_outcome.status);
        assert!(unreachable_outcome.error.as_ref().unwrap().contains("unreachable"));

        let reachable_outcome = batch_result.outcomes.iter().find(|it| it.destination_id == reachable.id).unwrap();
        assert_eq!(RunStatus::Success, reachable_outcome.status);
        assert!(reachable_outcome.error.is_none());

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_return_empty_batch_without_destinations(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        DefaultData::clear(ctx).await;

        let batch_result = DestinationRunner::run_all(&ctx.app_state, ctx.owner_id, json!({})).await?;

        assert!(batch_result.outcomes.is_empty());

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_fail_destination_with_unsupported_method(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        DefaultData::clear(ctx).await;

        let patched = DefaultData::create_success_destination(ctx, ctx.owner_id, "PATCH").await;
        let posted = DefaultData::create_success_destination(ctx, ctx.owner_id, "POST").await;

        HttpGatewayMock::mock_post_success(ctx, "/success", &json!({})).await;

        let batch_result = DestinationRunner::run_all(&ctx.app_state, ctx.owner_id, json!({})).await?;

        assert_eq!(2, batch_result.outcomes.len());

        let patched_outcome = batch_result.outcomes.iter().find(|it| it.destination_id == patched.id).unwrap();
        assert_eq!(RunStatus::Failure, patched_outcome.status);
        assert!(patched_outcome.error.as_ref().unwrap().contains("Unsupported http method"));

        let posted_outcome = batch_result.outcomes.iter().find(|it| it.destination_id == posted.id).unwrap();
        assert_eq!(RunStatus::Success, posted_outcome.status);

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_post_params_as_json_body(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        DefaultData::clear(ctx).await;

        let destination = DefaultData::create_success_destination(ctx, ctx.owner_id, "POST").await;

        HttpGatewayMock::mock_post_success(ctx, "/success", &json!({ "x": 1 })).await;

        let batch_result = DestinationRunner::run_all(&ctx.app_state, ctx.owner_id, json!({ "x": 1 })).await?;

        assert_eq!(1, batch_result.outcomes.len());
        assert_eq!(destination.id, batch_result.outcomes[0].destination_id);
        assert_eq!(RunStatus::Success, batch_result.outcomes[0].status);

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_send_params_as_query_string_on_get(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        DefaultData::clear(ctx).await;

        let destination = DefaultData::create_success_destination(ctx, ctx.owner_id, "GET").await;

        HttpGatewayMock::mock_get_with_query(ctx, "/success", "x", "1").await;

        let batch_result = DestinationRunner::run_all(&ctx.app_state, ctx.owner_id, json!({ "x": "1" })).await?;

        assert_eq!(1, batch_result.outcomes.len());
        assert_eq!(destination.id, batch_result.outcomes[0].destination_id);
        assert_eq!(RunStatus::Success, batch_result.outcomes[0].status);

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_not_run_foreign_destinations(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        DefaultData::clear(ctx).await;

        let foreign_url = format!("{}/foreign", ctx.gateway_uri);
        DefaultData::create_destination(ctx, ctx.other_owner_id, &foreign_url, "GET", None).await;
        let owned = DefaultData::create_success_destination(ctx, ctx.owner_id, "GET").await;

        HttpGatewayMock::mock_get_success(ctx, "/success").await;
        HttpGatewayMock::mock_never_called(ctx, "/foreign").await;

        let batch_result = DestinationRunner::run_all(&ctx.app_state, ctx.owner_id, json!({})).await?;

        assert_eq!(1, batch_result.outcomes.len());
        assert_eq!(owned.id, batch_result.outcomes[0].destination_id);

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_forward_stored_headers(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        use wiremock::matchers::{header, method, path};
        use wiremock::{Mock, ResponseTemplate};

        DefaultData::clear(ctx).await;

        let url = format!("{}/success", ctx.gateway_uri);
        let headers = DefaultData::headers(&[("x-api-key", "secret")]);
        DefaultData::create_destination(ctx, ctx.owner_id, &url, "POST", Some(headers)).await;

        Mock::given(method("POST"))
            .and(path("/success"))
            .and(header("x-api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&ctx.mock_server)
            .await;

        let batch_result = DestinationRunner::run_all(&ctx.app_state, ctx.owner_id, json!({})).await?;

        assert_eq!(1, batch_result.successes());

        Ok(())
    }
}
