use relaxa::balancer::RoundRobin;
use relaxa::Error;

#[test]
fn test_empty_pool() {
    let mut balancer = RoundRobin::new();
    assert!(balancer.is_empty());
    assert!(balancer.next_server().is_none());
    assert_eq!(balancer.process_request(1).unwrap_err(), Error::EmptyPool);
    assert_eq!(balancer.total_requests(), 0);
    assert!(balancer.history().is_empty());
    assert!(balancer.statistics().is_empty());
}

#[test]
fn test_rotation_order() {
    let mut balancer = RoundRobin::with_servers(3);
    let assigned: Vec<String> = (1..=7)
        .map(|id| balancer.process_request(id).unwrap().to_string())
        .collect();

    assert_eq!(
        assigned,
        vec!["server-1", "server-2", "server-3", "server-1", "server-2", "server-3", "server-1"]
    );
    assert_eq!(balancer.total_requests(), 7);
}

#[test]
fn test_every_server_gets_a_fair_share() {
    let servers = 5;
    let requests = 23;
    let mut balancer = RoundRobin::with_servers(servers);
    for id in 0..requests as u64 {
        balancer.process_request(id).unwrap();
    }

    for (i, server) in balancer.servers().iter().enumerate() {
        let expected = requests / servers + usize::from(i < requests % servers);
        assert_eq!(server.requests_handled, expected, "{}", server.name);
    }
}

#[test]
fn test_added_server_joins_before_head() {
    let mut balancer = RoundRobin::new();
    balancer.add_server("a");
    balancer.add_server("b");
    balancer.add_server("c");

    assert_eq!(balancer.process_request(1).unwrap(), "a");
    assert_eq!(balancer.process_request(2).unwrap(), "b");

    // The cursor stays on "c"; the new server follows it
    balancer.add_server("d");
    let next: Vec<String> = (3..=7)
        .map(|id| balancer.process_request(id).unwrap().to_string())
        .collect();
    assert_eq!(next, vec!["c", "d", "a", "b", "c"]);
    assert_eq!(balancer.len(), 4);
}

#[test]
fn test_history_and_statistics() {
    let mut balancer = RoundRobin::with_servers(2);
    for id in [10, 11, 12, 13] {
        balancer.process_request(id).unwrap();
    }
    balancer.add_server("late");

    let history = balancer.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].request_id, 10);
    assert_eq!(history[0].server, "server-1");
    assert_eq!(history[3].server, "server-2");
    assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    let stats = balancer.statistics();
    assert_eq!(stats.len(), 3);
    assert_eq!(stats[0].requests, 2);
    assert!((stats[0].percentage - 50.0).abs() < 1e-9);
    assert!((stats[1].percentage - 50.0).abs() < 1e-9);
    assert_eq!(stats[2].name, "late");
    assert_eq!(stats[2].percentage, 0.0);
}

#[test]
fn test_next_server_counts_nothing() {
    let mut balancer = RoundRobin::with_servers(2);
    assert_eq!(balancer.next_server().map(|s| s.name.clone()), Some("server-1".to_string()));
    assert_eq!(balancer.next_server().map(|s| s.name.clone()), Some("server-2".to_string()));
    assert_eq!(balancer.next_server().map(|s| s.name.clone()), Some("server-1".to_string()));
    assert_eq!(balancer.total_requests(), 0);
    assert!(balancer.servers().iter().all(|s| s.requests_handled == 0));
}
