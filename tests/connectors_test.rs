use std::cell::RefCell;
use std::rc::Rc;

use fanout::connectors::gym::GymConnector;
use fanout::connectors::stateful::StatefulConnector;
use fanout::core::connector::SharedConnector;
use fanout::{Action, Config, Connector, ConnectorKind, ConnectorManager, DataRecord};

#[test]
fn stateful_defaults_to_accepting_everything() {
    let mut conn = StatefulConnector::default();
    let rec = DataRecord::new();
    assert!(conn.apply_action(Action(17), &rec).unwrap());
    assert!(conn.apply_action(Action(-3), &rec).unwrap());
    assert_eq!(conn.last_action(), Some(Action(-3)));
    assert_eq!(conn.accepted(), 2);
}

#[test]
fn stateful_rejects_outside_allowed_set() {
    let mut conn = StatefulConnector::with_allowed([Action(0), Action(2)]);
    let rec = DataRecord::new();
    assert!(conn.apply_action(Action(2), &rec).unwrap());
    assert!(!conn.apply_action(Action(1), &rec).unwrap());
    assert_eq!(conn.last_action(), Some(Action(2)));
    assert_eq!((conn.accepted(), conn.rejected()), (1, 1));
}

#[test]
fn gym_bounds_action_space() {
    let mut conn = GymConnector::new(3);
    let rec = DataRecord::new().with("close", 10.0);
    assert!(conn.apply_action(Action(0), &rec).unwrap());
    assert!(conn.apply_action(Action(2), &rec).unwrap());
    assert!(!conn.apply_action(Action(3), &rec).unwrap());
    assert!(!conn.apply_action(Action(-1), &rec).unwrap());
    assert_eq!(conn.steps(), 2);
}

#[test]
fn kinds_build_from_config() {
    let cfg = Config {
        gym_actions: 5,
        ..Config::default()
    };
    let mut manager = ConnectorManager::new();
    for kind in ConnectorKind::ALL {
        manager.register(kind.build(&cfg));
    }
    assert_eq!(manager.names(), vec!["stateful", "openai-gym"]);

    let rec = DataRecord::new();
    assert!(manager.dispatch(Action(4), &rec).unwrap());
    assert!(!manager.dispatch(Action(5), &rec).unwrap());
}

#[test]
fn rejection_by_gym_still_reaches_stateful() {
    let gym = Rc::new(RefCell::new(GymConnector::new(2)));
    let stateful = Rc::new(RefCell::new(StatefulConnector::default()));

    let mut manager = ConnectorManager::new();
    manager.register(Box::new(SharedConnector::new(&gym)));
    manager.register(Box::new(SharedConnector::new(&stateful)));

    assert!(!manager.dispatch(Action(7), &DataRecord::new()).unwrap());
    assert_eq!(gym.borrow().steps(), 0);
    assert_eq!(stateful.borrow().last_action(), Some(Action(7)));
    assert_eq!(manager.names(), vec!["openai-gym", "stateful"]);
}
