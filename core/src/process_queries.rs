use rayon::prelude::*;

use crate::document::ScoredDocument;
use crate::error::Result;
use crate::search_server::SearchServer;

/// Run every query against `server` on the rayon pool. Results keep the
/// order of `queries`; the first failing query (in that order) is returned
/// as the error.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<ScoredDocument>>>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect()
}

/// [`process_queries`] flattened into one list, query by query.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<ScoredDocument>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    fn server() -> SearchServer {
        let mut server = SearchServer::new("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (id, text) in (1..).zip(texts) {
            server.add_document(id, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        server
    }

    #[test]
    fn results_follow_query_order() {
        let server = server();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair"];
        let results = process_queries(&server, &queries).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 5, 2]);
        for (query, hits) in queries.iter().zip(&results) {
            assert_eq!(hits, &server.find_top_documents(query).unwrap());
        }

        let joined = process_queries_joined(&server, &queries).unwrap();
        assert_eq!(joined.len(), 10);
        assert_eq!(joined[0], results[0][0]);
        assert_eq!(joined[9], results[2][1]);
    }

    #[test]
    fn first_failure_is_reported() {
        let server = server();
        let queries = vec!["rat".to_string(), "--rat".to_string()];
        assert!(process_queries(&server, &queries).is_err());
    }
}
