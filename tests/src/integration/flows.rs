//! # Callback Flow Tests
//!
//! Drives the assembled runtime (gateway + secretary) through its router the
//! way the platform does: encrypt, sign, wrap, POST, then open the reply.
//!
//! ## Flows Tested:
//!
//! 1. **URL verification**: known platform vector echoes back
//! 2. **Capture → list → done**: replies are sealed for the configured corp
//! 3. **Rejections**: tampered signature, foreign corp, missing ciphertext
//!    leave no stored item behind

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use tower::ServiceExt;

    use jarvis_runtime::{JarvisConfig, JarvisRuntime};
    use jv_01_envelope_codec::{encrypt_message, InboundEnvelope, ReplyEnvelope};
    use jv_02_callback_gateway::InboundMessage;
    use shared_crypto::{decode_key, signature};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const TOKEN: &str = "t1";
    const AES_KEY: &str = "jWmYm7qr5nMoAUwZRjGtBxmz3KA1tkAj3ykkR6q2B2C";
    const CORP_ID: &str = "wx5823bf96d3bd56c7";
    const TIMESTAMP: &str = "1409659589";
    const NONCE: &str = "263014780";

    fn runtime() -> JarvisRuntime {
        let config = JarvisConfig::from_lookup(|name| match name {
            "WECOM_TOKEN" => Some(TOKEN.to_string()),
            "WECOM_AES_KEY" => Some(AES_KEY.to_string()),
            "WECOM_CORP_ID" => Some(CORP_ID.to_string()),
            _ => None,
        })
        .unwrap();
        JarvisRuntime::new(config).unwrap()
    }

    fn inner_text(content: &str) -> String {
        format!(
            "<xml><ToUserName><![CDATA[{CORP_ID}]]></ToUserName>\
             <FromUserName><![CDATA[mycreate]]></FromUserName>\
             <CreateTime>1409659813</CreateTime><MsgType><![CDATA[text]]></MsgType>\
             <Content><![CDATA[{content}]]></Content><MsgId>4561255354251345929</MsgId>\
             <AgentID>218</AgentID></xml>"
        )
    }

    /// Encrypt `inner` for `corp_id` and build a signed POST.
    fn platform_post(inner: &str, corp_id: &str) -> Request<Body> {
        let key = decode_key(AES_KEY).unwrap();
        let encrypt = encrypt_message(&key, inner, corp_id).unwrap();
        let msg_signature = signature(TOKEN, TIMESTAMP, NONCE, &encrypt);
        let body = InboundEnvelope {
            to_user_name: Some(CORP_ID.to_string()),
            agent_id: Some("218".to_string()),
            encrypt,
        }
        .to_xml()
        .unwrap();

        Request::post(format!(
            "/wecom/callback?msg_signature={msg_signature}&timestamp={TIMESTAMP}&nonce={NONCE}"
        ))
        .header(header::CONTENT_TYPE, "text/xml")
        .body(Body::from(body))
        .unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> Response {
        router.clone().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// POST `content` as the platform and return the decrypted reply message.
    async fn converse(router: &Router, content: &str) -> InboundMessage {
        let response = send(router, platform_post(&inner_text(content), CORP_ID)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/xml"
        );

        let reply = ReplyEnvelope::parse(&body_text(response).await).unwrap();
        assert!(reply.verify(TOKEN), "reply signature must verify");

        let payload = reply.open(&decode_key(AES_KEY).unwrap()).unwrap();
        assert_eq!(payload.sender_identity, CORP_ID);
        InboundMessage::parse(&payload.message).unwrap()
    }

    // =============================================================================
    // INTEGRATION TESTS: URL VERIFICATION
    // =============================================================================

    #[tokio::test]
    async fn test_url_verification_known_vector() {
        let router = runtime().server().router();
        let uri = "/wecom/callback?msg_signature=df53d25a07e6e2465cbce819eb966a038ac61669\
            &timestamp=1409659589&nonce=263014780\
            &echostr=sKqRbbiSUnDhFHOvPjtUMWzf2R8PrpMiTTPaicBgqZlYW%2FWsF6SiFd2z9CriX2YpWYzF1yrNNQ0SomM3ovdnfA%3D%3D";

        let response = send(&router, Request::get(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "1616140317555161061");
    }

    #[tokio::test]
    async fn test_url_verification_wrong_signature() {
        let router = runtime().server().router();
        let uri = "/wecom/callback?msg_signature=0000000000000000000000000000000000000000\
            &timestamp=1409659589&nonce=263014780&echostr=abc";

        let response = send(&router, Request::get(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_text(response).await, "signature mismatch");
    }

    // =============================================================================
    // INTEGRATION TESTS: MESSAGE → SECRETARY → SEALED REPLY
    // =============================================================================

    #[tokio::test]
    async fn test_capture_list_done_cycle() {
        let runtime = runtime();
        let router = runtime.server().router();

        let reply = converse(&router, "buy milk").await;
        assert_eq!(reply.to_user, "mycreate");
        assert_eq!(reply.from_user, CORP_ID);
        assert_eq!(reply.msg_type, "text");
        assert!(reply.content.contains("TODO_ID: 1"), "{}", reply.content);
        assert!(reply.content.contains("TITLE: buy milk"), "{}", reply.content);

        let reply = converse(&router, "1").await;
        assert!(reply.content.contains("1. buy milk"), "{}", reply.content);

        let reply = converse(&router, "完成 1").await;
        assert!(reply.content.contains("#1 buy milk"), "{}", reply.content);

        let items = runtime.secretary().items();
        assert_eq!(items.len(), 1);
        assert!(items[0].done);
    }

    #[tokio::test]
    async fn test_link_capture_visible_in_debug_items() {
        let runtime = runtime();
        let router = runtime.server().router();

        let reply = converse(&router, "https://mp.weixin.qq.com/s/abc").await;
        assert!(reply.content.contains("TYPE: mp_article"), "{}", reply.content);

        let response = send(
            &router,
            Request::get("/debug/items").body(Body::empty()).unwrap(),
        )
        .await;
        let items: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(items.as_array().map(Vec::len), Some(1));
        assert_eq!(items[0]["kind"], "mp_article");
    }

    // =============================================================================
    // INTEGRATION TESTS: REJECTIONS LEAVE NO TRACE
    // =============================================================================

    #[tokio::test]
    async fn test_foreign_corp_rejected() {
        let runtime = runtime();
        let router = runtime.server().router();

        let response = send(&router, platform_post(&inner_text("hi"), "wx_other_corp")).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_text(response).await, "corp id mismatch");
        assert!(runtime.secretary().items().is_empty());
    }

    #[tokio::test]
    async fn test_tampered_signature_rejected() {
        let runtime = runtime();
        let router = runtime.server().router();

        let request = platform_post(&inner_text("hi"), CORP_ID);
        let (mut parts, body) = request.into_parts();
        let uri = parts
            .uri
            .to_string()
            .replace(&format!("nonce={NONCE}"), "nonce=999999999");
        parts.uri = uri.parse().unwrap();

        let response = send(&router, Request::from_parts(parts, body)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(runtime.secretary().items().is_empty());
    }

    #[tokio::test]
    async fn test_missing_ciphertext_rejected() {
        let runtime = runtime();
        let router = runtime.server().router();

        let request = Request::post(format!(
            "/wecom/callback?msg_signature=abc&timestamp={TIMESTAMP}&nonce={NONCE}"
        ))
        .body(Body::from("<xml><ToUserName><![CDATA[x]]></ToUserName></xml>"))
        .unwrap();

        let response = send(&router, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(runtime.secretary().items().is_empty());
    }

    #[tokio::test]
    async fn test_metrics_reflect_outcomes() {
        let router = runtime().server().router();

        converse(&router, "note one").await;
        let _ = send(&router, platform_post(&inner_text("x"), "wx_other_corp")).await;

        let response = send(
            &router,
            Request::get("/debug/metrics").body(Body::empty()).unwrap(),
        )
        .await;
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["requests"]["messages_ok"], 1);
        assert_eq!(json["requests"]["rejected"], 1);
    }
}
