use mcp_mealie::config::MealieConfig;
use mcp_mealie::server::MealieMcpServer;
use rmcp::ServerHandler;

#[test]
fn test_server_advertises_tools() {
    let server = MealieMcpServer::new(&MealieConfig::default());

    let info = server.get_info();

    assert!(info.capabilities.tools.is_some(), "tools capability should be enabled");
    assert!(info
        .instructions
        .as_deref()
        .is_some_and(|text| text.contains("shopping lists")));
}

#[test]
fn test_server_uses_configured_base_url() {
    let config = MealieConfig {
        base_url: "http://mealie.internal:9925/".to_string(),
        ..MealieConfig::default()
    };

    let server = MealieMcpServer::new(&config);

    assert_eq!(
        server.api().lists.requests().base_url(),
        "http://mealie.internal:9925"
    );
}
