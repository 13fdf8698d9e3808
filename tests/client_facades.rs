//! End-to-end facade behaviour against the stub indexer.

mod common;

use axum::http::StatusCode;
use common::StubIndexer;
use serde_json::{json, Value};
use zenland::{
    Amount, ClientConfig, IneligibleReason, ListEscrowsArgs, StateGroup, ZenlandClient,
};

fn client_for(stub: &StubIndexer) -> ZenlandClient {
    ZenlandClient::new(ClientConfig::new(stub.base_url.clone())).unwrap()
}

fn escrow(id: &str, state: &str, amount: &str) -> Value {
    json!({
        "id": id,
        "chainId": 1,
        "buyer": "0xbuyer",
        "seller": "0xseller",
        "agent": null,
        "amount": amount,
        "token": "0xusdc",
        "state": state,
        "createdAt": "1700000000"
    })
}

fn escrow_page(items: Vec<Value>, total: u64) -> Value {
    json!({
        "escrows": {
            "items": items,
            "pageInfo": {"hasNextPage": false, "hasPreviousPage": false},
            "totalCount": total
        }
    })
}

#[tokio::test]
async fn address_filters_are_case_insensitive() {
    let stub = StubIndexer::data(escrow_page(vec![escrow("0xe1", "ACTIVE", "10")], 1)).await;
    let client = client_for(&stub);

    client
        .escrows()
        .list(ListEscrowsArgs {
            buyer: Some("0xABCDEF".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let upper = stub.last_variables();

    client
        .escrows()
        .list(ListEscrowsArgs {
            buyer: Some("0xabcdef".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let lower = stub.last_variables();

    assert_eq!(upper, lower);
    assert_eq!(upper["where"], json!({"buyer": "0xabcdef"}));
    assert_eq!(upper["limit"], json!(30));
    assert_eq!(upper["offset"], json!(0));
    assert_eq!(upper["orderBy"], json!("createdAt"));
    assert_eq!(upper["orderDirection"], json!("desc"));
}

#[tokio::test]
async fn unconstrained_listing_omits_where() {
    let stub = StubIndexer::data(escrow_page(vec![], 0)).await;
    client_for(&stub)
        .escrows()
        .list(ListEscrowsArgs::default())
        .await
        .unwrap();
    assert!(stub.last_variables().get("where").is_none());
}

#[tokio::test]
async fn unknown_escrow_is_none() {
    let stub = StubIndexer::data(json!({"escrow": null})).await;
    let found = client_for(&stub).escrows().get_by_id("0xDEAD").await.unwrap();
    assert!(found.is_none());
    assert_eq!(stub.last_variables(), json!({"id": "0xdead"}));
}

#[tokio::test]
async fn stats_include_active_agent_stake() {
    let stub = StubIndexer::data(json!({
        "protocolStats": {
            "id": "mainnet",
            "chainId": 1,
            "totalEscrowsCreated": "12",
            "totalVolumeEscrowed": "90000",
            "totalFeesCollected": "45",
            "currentTVL": "1000",
            "activeEscrowCount": 4,
            "totalAgentsRegistered": 3,
            "activeAgentsCount": 2
        },
        "agents": {"items": [{"stablecoinStake": "100"}, {"stablecoinStake": "200"}]}
    }))
    .await;

    let stats = client_for(&stub)
        .protocol_stats()
        .get(None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stats.current_tvl, Amount::from(1300));
    assert_eq!(stats.escrow_tvl, Amount::from(1000));
    assert_eq!(stats.agent_staking_tvl, Amount::from(300));
    assert_eq!(stats.total_escrows_created, 12);

    let serialized = serde_json::to_value(&stats).unwrap();
    assert_eq!(serialized["currentTVL"], json!("1300"));
    assert_eq!(serialized["escrowTVL"], json!("1000"));
    assert_eq!(serialized["agentStakingTVL"], json!("300"));
}

#[tokio::test]
async fn stats_scope_is_forwarded() {
    let stub = StubIndexer::data(json!({"protocolStats": null, "agents": {"items": []}})).await;
    let stats = client_for(&stub)
        .protocol_stats()
        .get(Some("sepolia"))
        .await
        .unwrap();
    assert!(stats.is_none());
    assert_eq!(stub.last_variables()["id"], json!("sepolia"));
}

#[tokio::test]
async fn eligibility_against_fetched_agent() {
    let stub = StubIndexer::data(json!({
        "agent": {
            "id": "0xagent",
            "isActive": true,
            "isAvailable": false,
            "stablecoinDecimals": 6,
            "stablecoinStake": "100",
            "registrationTime": "1700000000"
        }
    }))
    .await;

    let outcome = client_for(&stub)
        .agents()
        .check_eligibility("0xAgent", &Amount::from(10))
        .await
        .unwrap();
    assert_eq!(outcome.reason(), Some(IneligibleReason::NotAvailable));
    assert_eq!(outcome.agent_value(), None);
    assert_eq!(stub.last_variables(), json!({"id": "0xagent"}));
}

#[tokio::test]
async fn user_dashboard_rolls_up_concurrent_reads() {
    let stub = StubIndexer::start(|body| {
        let vars = &body["variables"];
        let total = match StateGroup::ALL
            .iter()
            .position(|g| vars["where"]["state_in"] == json!(g.states()))
        {
            Some(0) => 2,
            Some(1) => 1,
            Some(2) => 5,
            _ => 2,
        };
        let items = if vars["limit"] == json!(1) {
            vec![]
        } else {
            vec![escrow("0xe1", "ACTIVE", "400"), escrow("0xe2", "DISPUTED", "600")]
        };
        (
            StatusCode::OK,
            json!({"data": escrow_page(items, total)}).to_string(),
        )
    })
    .await;

    let stats = client_for(&stub)
        .dashboard()
        .user_dashboard("0xUSER")
        .await
        .unwrap();
    assert_eq!(stats.active_count, 2);
    assert_eq!(stats.dispute_count, 1);
    assert_eq!(stats.completed_count, 5);
    assert_eq!(stats.tvl, Some(Amount::from(1000)));
    assert_eq!(stats.recent_escrows.len(), 2);

    let requests = stub.requests();
    assert_eq!(requests.len(), 5);
    for request in &requests {
        assert_eq!(
            request["variables"]["where"]["OR"][0],
            json!({"buyer": "0xuser"})
        );
    }
}

#[tokio::test]
async fn dashboard_fails_when_any_read_fails() {
    let stub = StubIndexer::start(|body| {
        if body["variables"]["limit"] == json!(5) {
            (StatusCode::BAD_GATEWAY, "upstream".to_string())
        } else {
            (
                StatusCode::OK,
                json!({"data": escrow_page(vec![], 0)}).to_string(),
            )
        }
    })
    .await;

    let err = client_for(&stub)
        .dashboard()
        .global_dashboard()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
}
