#[cfg(test)]
mod test {
    use serde_json::{json, Value};

    use crate::config::settings::{MetricsConfig, ServerConfig, SettingsConfig};
    use crate::identity::google::tests::sample_id_token;
    use crate::identity::FederatedCredentials;
    use crate::server::server;
    use crate::tests::common::{
        build_reqwest_client, fake_app, spawn_axum, wait_until, FakeAuthInstance, RecordingFactory,
    };
    use crate::utils::constants::GOOGLE_PROVIDER;

    fn settings() -> SettingsConfig {
        SettingsConfig {
            metrics: MetricsConfig {
                path: "/metrics".into(),
                is_enabled: true,
            },
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: "0".into(),
            },
            logging: None,
        }
    }

    #[tokio::test]
    async fn views_follow_navigation() {
        let app = fake_app(RecordingFactory::succeeding("COGNITO_ID"), None);
        let _ready = app.app_on_ready();
        let (_server, addr) = spawn_axum(server::router(&settings(), app.clone())).await;
        let client = build_reqwest_client();
        let base = format!("http://{}", addr);

        let view: Value = client.get(format!("{}/view", base)).send().await.unwrap().json().await.unwrap();
        assert_eq!(view["class"], "landing-view");

        let response = client
            .post(format!("{}/navigate", base))
            .json(&json!({ "hash": "#problem-2" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 202);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "hash": "#problem-2", "changed": true }));

        assert!(wait_until(|| app.router.container().current().and_then(|v| v.title) == Some("Problem #2".into())).await);
        let view: Value = client.get(format!("{}/view", base)).send().await.unwrap().json().await.unwrap();
        assert_eq!(view["class"], "problem-view");
        assert_eq!(view["title"], "Problem #2");
    }

    #[tokio::test]
    async fn answers_are_checked() {
        let app = fake_app(RecordingFactory::succeeding("COGNITO_ID"), None);
        let (_server, addr) = spawn_axum(server::router(&settings(), app)).await;
        let client = build_reqwest_client();

        let response = client
            .post(format!("http://{}/problems/1/answer", addr))
            .json(&json!({ "answer": "true" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let feedback: Value = response.json().await.unwrap();
        assert_eq!(feedback["correct"], true);
        assert_eq!(feedback["next"], "#problem-2");

        let response = client
            .post(format!("http://{}/problems/1/answer", addr))
            .json(&json!({ "answer": "false" }))
            .send()
            .await
            .unwrap();
        let feedback: Value = response.json().await.unwrap();
        assert_eq!(feedback["correct"], false);

        let response = client
            .post(format!("http://{}/problems/99/answer", addr))
            .json(&json!({ "answer": "true" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn sign_in_resolves_and_refreshes_identity() {
        let factory = RecordingFactory::succeeding("COGNITO_ID");
        let instance = FakeAuthInstance::issuing("REFRESHED_TOKEN");
        let app = fake_app(factory.clone(), Some(instance.clone()));
        let (_server, addr) = spawn_axum(server::router(&settings(), app)).await;
        let client = build_reqwest_client();
        let base = format!("http://{}", addr);

        let response = client.get(format!("{}/identity", base)).send().await.unwrap();
        assert_eq!(response.status(), 401);
        let response = client.post(format!("{}/identity/refresh", base)).send().await.unwrap();
        assert_eq!(response.status(), 401);

        let response = client
            .post(format!("{}/auth/google", base))
            .json(&json!({ "id_token": "not-a-jwt" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);

        let id_token = sample_id_token("foo@bar.com");
        let response = client
            .post(format!("{}/auth/google", base))
            .json(&json!({ "id_token": id_token }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let identity: Value = response.json().await.unwrap();
        assert_eq!(identity, json!({ "id": "COGNITO_ID", "email": "foo@bar.com" }));
        assert_eq!(factory.created.lock()[0].logins[GOOGLE_PROVIDER], id_token);

        let identity: Value = client.get(format!("{}/identity", base)).send().await.unwrap().json().await.unwrap();
        assert_eq!(identity["email"], "foo@bar.com");

        assert_eq!(factory.instances.lock()[0].refreshes(), 1);
        let response = client.post(format!("{}/identity/refresh", base)).send().await.unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "id": "COGNITO_ID" }));
        assert_eq!(instance.calls.lock().len(), 1);
        let logins = factory.instances.lock()[0].params().logins;
        assert_eq!(logins[GOOGLE_PROVIDER], "REFRESHED_TOKEN");
        // the refreshed token was exchanged for new cloud credentials
        assert_eq!(factory.instances.lock()[0].refreshes(), 2);
    }

    #[tokio::test]
    async fn second_sign_in_is_a_conflict() {
        let factory = RecordingFactory::succeeding("COGNITO_ID");
        let app = fake_app(factory.clone(), None);
        let (_server, addr) = spawn_axum(server::router(&settings(), app.clone())).await;
        let client = build_reqwest_client();
        let url = format!("http://{}/auth/google", addr);

        let first = sample_id_token("alice@bar.com");
        let response = client.post(&url).json(&json!({ "id_token": first })).send().await.unwrap();
        assert_eq!(response.status(), 200);

        let response = client
            .post(&url)
            .json(&json!({ "id_token": sample_id_token("bob@bar.com") }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 409);

        assert_eq!(factory.created.lock().len(), 1);
        let installed = app.cloud.credentials().expect("credentials installed");
        assert_eq!(installed.params().logins[GOOGLE_PROVIDER], first);
        let identity = app.identity().peek().unwrap().unwrap();
        assert_eq!(identity.email, "alice@bar.com");
    }

    #[tokio::test]
    async fn refresh_failure_is_a_bad_gateway() {
        let app = fake_app(RecordingFactory::succeeding("COGNITO_ID"), None);
        let (_server, addr) = spawn_axum(server::router(&settings(), app)).await;
        let client = build_reqwest_client();

        let response = client
            .post(format!("http://{}/auth/google", addr))
            .json(&json!({ "id_token": sample_id_token("foo@bar.com") }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        // no auth instance installed
        let response = client.post(format!("http://{}/identity/refresh", addr)).send().await.unwrap();
        assert_eq!(response.status(), 502);
    }

    #[tokio::test]
    async fn metrics_are_exposed_when_enabled() {
        let app = fake_app(RecordingFactory::succeeding("COGNITO_ID"), None);
        app.router.navigate("#problem-1");
        let (_server, addr) = spawn_axum(server::router(&settings(), app.clone())).await;
        let client = build_reqwest_client();

        let response = client.get(format!("http://{}/metrics", addr)).send().await.unwrap();
        assert_eq!(response.status(), 200);
        let body = response.text().await.unwrap();
        assert!(body.contains("learnjs_view_renders_total"), "{}", body);

        let mut disabled = settings();
        disabled.metrics.is_enabled = false;
        let (_server, addr) = spawn_axum(server::router(&disabled, app)).await;
        let response = client.get(format!("http://{}/metrics", addr)).send().await.unwrap();
        assert_eq!(response.status(), 404);
    }
}
