//! Search and pagination controller methods

use crate::model::{ActiveSection, Completion, FetchTicket, QueryError};
use super::{AppController, FetchOutcome};

impl AppController {
    pub fn submit_search(&mut self) {
        let result = self.model.submit_search();
        if matches!(result, Ok(Some(_))) {
            self.model.set_active_section(ActiveSection::Results);
        }
        self.dispatch(result);
    }

    pub fn change_page(&mut self, page: u32) {
        let result = self.model.change_page(page);
        self.dispatch(result);
    }

    pub fn next_page(&mut self) {
        let result = self.model.next_page();
        self.dispatch(result);
    }

    pub fn previous_page(&mut self) {
        let result = self.model.previous_page();
        self.dispatch(result);
    }

    pub fn select_highlighted_movie(&mut self) {
        if let Err(e) = self.model.select_highlighted_movie() {
            tracing::debug!(error = %e, "Movie selection rejected");
        }
    }

    pub fn close_modal(&mut self) {
        self.model.close_modal();
    }

    /// Hand a finished request back to the model. Superseded results are dropped there.
    pub fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        let FetchOutcome { ticket, result } = outcome;
        let error_detail = result.as_ref().err().map(Self::format_error);

        let completion = self.model.complete_fetch(&ticket, result);
        if let Completion::Applied(_) = completion {
            self.model.ui_state.error_detail = error_detail;
            self.in_flight = None;
        }
    }

    fn dispatch(&mut self, result: Result<Option<FetchTicket>, QueryError>) {
        match result {
            Ok(Some(ticket)) => {
                self.model.ui_state.error_detail = None;
                self.spawn_fetch(ticket);
            }
            Ok(None) => {}
            Err(e) => tracing::debug!(error = %e, "No fetch issued"),
        }
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        if let Some(previous) = self.in_flight.take() {
            // The generation check already ignores its result; stop the transport too
            previous.abort();
        }

        let client = self.client.clone();
        let outcomes = self.outcomes.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = client.search(&ticket.query, ticket.page).await;
            if outcomes.send(FetchOutcome { ticket, result }).is_err() {
                tracing::debug!("Event loop gone, dropping fetch result");
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::{mpsc, oneshot};

    use crate::controller::{AppController, FetchOutcome};
    use crate::model::{
        ClientError, FetchTicket, MetadataClient, MovieSummary, NotificationKind, RequestStatus,
        ResultPage,
    };

    type Gate = oneshot::Receiver<Result<ResultPage, ClientError>>;

    /// Fake client whose responses are released by the test, one gate per (query, page)
    #[derive(Default)]
    struct GatedClient {
        gates: Mutex<HashMap<(String, u32), Gate>>,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl GatedClient {
        fn gate(&self, query: &str, page: u32) -> oneshot::Sender<Result<ResultPage, ClientError>> {
            let (tx, rx) = oneshot::channel();
            self.gates
                .lock()
                .unwrap()
                .insert((query.to_string(), page), rx);
            tx
        }

        fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MetadataClient for GatedClient {
        async fn search(&self, query: &str, page: u32) -> Result<ResultPage, ClientError> {
            self.calls.lock().unwrap().push((query.to_string(), page));
            let gate = self
                .gates
                .lock()
                .unwrap()
                .remove(&(query.to_string(), page))
                .expect("no gate registered for request");
            match gate.await {
                Ok(result) => result,
                Err(_) => Err(ClientError::Api {
                    status: 599,
                    message: "gate dropped".to_string(),
                }),
            }
        }
    }

    fn page(page: u32, first_id: u64, count: u64, total_pages: u32) -> ResultPage {
        ResultPage {
            page,
            items: (first_id..first_id + count)
                .map(|id| MovieSummary {
                    id,
                    title: format!("Movie {}", id),
                    poster_path: None,
                    backdrop_path: None,
                    overview: None,
                    release_date: Some("2008-07-16".to_string()),
                    vote_average: Some(8.5),
                })
                .collect(),
            total_pages,
            total_results: count * total_pages as u64,
        }
    }

    fn controller(client: &Arc<GatedClient>) -> (AppController, mpsc::UnboundedReceiver<FetchOutcome>) {
        AppController::new(client.clone())
    }

    fn type_query(controller: &mut AppController, text: &str) {
        controller.model.clear_search_input();
        for c in text.chars() {
            controller.model.append_to_search(c);
        }
    }

    async fn next_outcome(rx: &mut mpsc::UnboundedReceiver<FetchOutcome>) -> FetchOutcome {
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("fetch outcome timed out")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn batman_search_then_page_change() {
        let client = Arc::new(GatedClient::default());
        let (mut controller, mut rx) = controller(&client);

        let first = client.gate("batman", 1);
        type_query(&mut controller, "batman");
        controller.submit_search();
        assert_eq!(controller.model().query.status(), RequestStatus::Loading);

        first.send(Ok(page(1, 1, 20, 5))).unwrap();
        let outcome = next_outcome(&mut rx).await;
        controller.apply_fetch_outcome(outcome);
        assert_eq!(controller.model().query.status(), RequestStatus::Success);
        assert_eq!(controller.model().query.page(), 1);

        let third = client.gate("batman", 3);
        controller.change_page(3);
        assert_eq!(controller.model().query.status(), RequestStatus::Loading);
        assert_eq!(
            controller.model().query.displayed_page().unwrap().items.len(),
            20
        );

        third.send(Ok(page(3, 41, 20, 5))).unwrap();
        let outcome = next_outcome(&mut rx).await;
        controller.apply_fetch_outcome(outcome);
        assert_eq!(controller.model().query.page(), 3);
        assert_eq!(controller.model().query.status(), RequestStatus::Success);

        type_query(&mut controller, "");
        controller.submit_search();
        assert_eq!(controller.model().query.query(), "batman");
        assert_eq!(controller.model().query.page(), 3);
        assert_eq!(
            controller.model().notifications.visible()[0].kind,
            NotificationKind::EmptyQuery
        );
        assert_eq!(client.calls(), vec![("batman".to_string(), 1), ("batman".to_string(), 3)]);
    }

    #[tokio::test]
    async fn newer_search_wins_over_slow_older_one() {
        let client = Arc::new(GatedClient::default());
        let (mut controller, mut rx) = controller(&client);

        let slow = client.gate("batman", 1);
        let fast = client.gate("superman", 1);

        type_query(&mut controller, "batman");
        controller.submit_search();
        tokio::task::yield_now().await;

        type_query(&mut controller, "superman");
        controller.submit_search();

        fast.send(Ok(page(1, 100, 3, 1))).unwrap();
        let outcome = next_outcome(&mut rx).await;
        controller.apply_fetch_outcome(outcome);

        // The superseded task was aborted, so its gate has no listener any more
        let _ = slow.send(Ok(page(1, 1, 20, 5)));
        tokio::time::sleep(Duration::from_millis(20)).await;
        while let Ok(late) = rx.try_recv() {
            controller.apply_fetch_outcome(late);
        }

        let query = &controller.model().query;
        assert_eq!(query.query(), "superman");
        assert_eq!(query.active_page().unwrap().items[0].id, 100);
    }

    #[tokio::test]
    async fn stale_outcome_delivered_late_is_ignored() {
        let client = Arc::new(GatedClient::default());
        let (mut controller, mut rx) = controller(&client);

        let gate = client.gate("superman", 1);
        type_query(&mut controller, "superman");
        controller.submit_search();
        gate.send(Ok(page(1, 100, 3, 1))).unwrap();
        let outcome = next_outcome(&mut rx).await;
        controller.apply_fetch_outcome(outcome);

        let stale = FetchOutcome {
            ticket: FetchTicket {
                generation: 0,
                query: "batman".to_string(),
                page: 1,
            },
            result: Ok(page(1, 1, 20, 5)),
        };
        controller.apply_fetch_outcome(stale);

        let query = &controller.model().query;
        assert_eq!(query.query(), "superman");
        assert_eq!(query.active_page().unwrap().items[0].id, 100);
    }

    #[tokio::test]
    async fn failure_sets_error_and_notifies_once() {
        let client = Arc::new(GatedClient::default());
        let (mut controller, mut rx) = controller(&client);

        let gate = client.gate("batman", 1);
        type_query(&mut controller, "batman");
        controller.submit_search();
        gate.send(Err(ClientError::Api {
            status: 429,
            message: "slow down".to_string(),
        }))
        .unwrap();
        let outcome = next_outcome(&mut rx).await;
        controller.apply_fetch_outcome(outcome);

        let model = controller.model();
        assert_eq!(model.query.status(), RequestStatus::Error);
        assert!(model.query.displayed_page().is_none());
        assert_eq!(model.notifications.visible().len(), 1);
        assert!(matches!(
            model.notifications.visible()[0].kind,
            NotificationKind::FetchFailed { .. }
        ));
        assert_eq!(
            model.ui_state.error_detail.as_deref(),
            Some("Rate limited. Please wait a moment.")
        );

        // resubmitting retries
        let retry = client.gate("batman", 1);
        controller.submit_search();
        assert_eq!(controller.model().query.status(), RequestStatus::Loading);
        assert!(controller.model().ui_state.error_detail.is_none());
        retry.send(Ok(page(1, 1, 20, 5))).unwrap();
        let outcome = next_outcome(&mut rx).await;
        controller.apply_fetch_outcome(outcome);
        assert_eq!(controller.model().query.status(), RequestStatus::Success);
    }

    #[tokio::test]
    async fn empty_results_notify_once() {
        let client = Arc::new(GatedClient::default());
        let (mut controller, mut rx) = controller(&client);

        let gate = client.gate("qwxz", 1);
        type_query(&mut controller, "qwxz");
        controller.submit_search();
        gate.send(Ok(page(1, 1, 0, 0))).unwrap();
        let outcome = next_outcome(&mut rx).await;
        controller.apply_fetch_outcome(outcome);

        // same query again: already loaded, nothing refetched or re-announced
        controller.submit_search();
        let model = controller.model();
        assert_eq!(model.notifications.visible().len(), 1);
        assert_eq!(
            model.notifications.visible()[0].kind,
            NotificationKind::NoResults {
                query: "qwxz".to_string()
            }
        );
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn new_search_closes_open_modal() {
        let client = Arc::new(GatedClient::default());
        let (mut controller, mut rx) = controller(&client);

        let gate = client.gate("batman", 1);
        type_query(&mut controller, "batman");
        controller.submit_search();
        gate.send(Ok(page(1, 1, 20, 5))).unwrap();
        let outcome = next_outcome(&mut rx).await;
        controller.apply_fetch_outcome(outcome);

        controller.select_highlighted_movie();
        assert!(controller.model().is_modal_open());

        let _pending = client.gate("joker", 1);
        type_query(&mut controller, "joker");
        controller.submit_search();
        assert!(!controller.model().is_modal_open());
        assert_eq!(controller.model().query.page(), 1);
    }

    #[tokio::test]
    async fn out_of_range_page_issues_no_request() {
        let client = Arc::new(GatedClient::default());
        let (mut controller, mut rx) = controller(&client);

        let gate = client.gate("batman", 1);
        type_query(&mut controller, "batman");
        controller.submit_search();
        gate.send(Ok(page(1, 1, 20, 2))).unwrap();
        let outcome = next_outcome(&mut rx).await;
        controller.apply_fetch_outcome(outcome);

        controller.change_page(3);
        controller.previous_page();
        tokio::task::yield_now().await;
        assert_eq!(client.calls().len(), 1);
        assert_eq!(controller.model().query.status(), RequestStatus::Success);
    }
}
