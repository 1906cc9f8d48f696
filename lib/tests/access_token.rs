
#[cfg(test)]
mod test {
    use crate::commons::{DefaultData, TestContext};
    use destination_relay::error::ForwardError;
    use destination_relay::token::AccessTokenRepository;
    use serial_test::serial;
    use test_context::test_context;

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_resolve_known_token_to_its_user(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let token = AccessTokenRepository::find_by_key(&ctx.postgres_pool, &ctx.owner_token).await?.unwrap();

        assert_eq!(ctx.owner_id, token.user_id);
        assert_eq!(ctx.owner_token, token.key);

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_return_none_for_unknown_token(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let token = AccessTokenRepository::find_by_key(&ctx.postgres_pool, "nope").await?;

        assert!(token.is_none());

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_accept_headers_with_known_embedded_token(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let headers = DefaultData::headers(&[("Authorization", &format!("Token {}", ctx.owner_token))]);

        let result = AccessTokenRepository::verify_embedded_authorization(&ctx.postgres_pool, Some(&headers)).await;

        assert_eq!(Ok(()), result);

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_reject_headers_with_unknown_embedded_token(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let headers = DefaultData::headers(&[("Authorization", "Token nope")]);

        let result = AccessTokenRepository::verify_embedded_authorization(&ctx.postgres_pool, Some(&headers)).await;

        assert_eq!(Err(ForwardError::Unauthorized("Authorization credentials not found".to_string())), result);

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_reject_malformed_authorization_value(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let headers = DefaultData::headers(&[("Authorization", "justakey")]);

        let result = AccessTokenRepository::verify_embedded_authorization(&ctx.postgres_pool, Some(&headers)).await;

        assert_eq!(Err(ForwardError::Unauthorized("Authorization credentials not found".to_string())), result);

        Ok(())
    }

    #[test_context(TestContext)]
    #[serial]
    #[tokio::test]
    async fn should_pass_headers_without_authorization_entry(ctx: &mut TestContext) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let headers = DefaultData::headers(&[("x-api-key", "secret")]);

        let result = AccessTokenRepository::verify_embedded_authorization(&ctx.postgres_pool, Some(&headers)).await;

        assert_eq!(Ok(()), result);
        assert_eq!(Ok(()), AccessTokenRepository::verify_embedded_authorization(&ctx.postgres_pool, None).await);

        Ok(())
    }
}
