use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

/// Requests that can be matched with their responses.
pub(crate) trait Identified {
    fn id(&self) -> Uuid;
}

/// FIFO of pending requests plus the responses reported for them.
#[derive(Debug)]
pub(crate) struct RequestQueue<Req, Resp> {
    requests: VecDeque<Req>,
    responses: HashMap<Uuid, Resp>,
}

impl<Req, Resp> Default for RequestQueue<Req, Resp> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Resp> RequestQueue<Req, Resp> {
    pub fn new() -> Self {
        Self { requests: VecDeque::new(), responses: HashMap::new() }
    }

    pub fn add_response(&mut self, id: Uuid, response: Resp) {
        self.responses.insert(id, response);
    }

    /// Takes the response for `id`, if one was reported.
    pub fn get_response(&mut self, id: &Uuid) -> Option<Resp> {
        self.responses.remove(id)
    }
}

impl<Req: Identified, Resp> RequestQueue<Req, Resp> {
    pub fn add_request(&mut self, request: Req) {
        self.requests.push_back(request);
    }

    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.iter().any(|req| req.id() == *id)
    }

    /// The oldest pending request, left in the queue.
    pub fn read_request(&self) -> Option<&Req> {
        self.requests.front()
    }

    pub fn remove_request(&mut self, id: &Uuid) {
        self.requests.retain(|req| req.id() != *id);
    }
}
