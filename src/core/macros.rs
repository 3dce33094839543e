/// Register several default-constructed connectors in one go.
///
/// ```
/// use fanout::connectors::{gym::GymConnector, stateful::StatefulConnector};
/// let mut manager = fanout::ConnectorManager::new();
/// fanout::register_connectors!(manager, StatefulConnector, GymConnector);
/// assert_eq!(manager.names(), vec!["stateful", "openai-gym"]);
/// ```
#[macro_export]
macro_rules! register_connectors {
    ($manager:expr, $( $conn:ty ),* $(,)?) => {
        $(
            $manager.register(Box::new(<$conn>::default()));
        )*
    };
}
