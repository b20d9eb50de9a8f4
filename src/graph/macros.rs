//! Macro for convenient Cypher query construction.

/// Shorthand for `executor.query(..)` followed by one `.param(..)` per
/// named argument.
///
/// ```ignore
/// use stancegraph::cypher;
///
/// let rows = cypher!(
///     graph,
///     "MATCH (t:Topic {name: $topic}) RETURN count(t) AS n",
///     topic = "lockdown",
/// )
/// .fetch_all()
/// .await?;
/// ```
#[macro_export]
macro_rules! cypher {
    ($graph:expr, $query:expr) => {
        $graph.query($query)
    };
    ($graph:expr, $query:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $graph.query($query)$(.param(stringify!($name), $value))+
    };
}
