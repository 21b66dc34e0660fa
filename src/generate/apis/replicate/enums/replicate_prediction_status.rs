pub enum ReplicatePredictionStatus {
    Succeeded,
    Failed,
    Canceled,
}

impl ReplicatePredictionStatus {
    pub fn value(&self) -> String {
        match *self {
            ReplicatePredictionStatus::Succeeded => "succeeded".to_string(),
            ReplicatePredictionStatus::Failed => "failed".to_string(),
            ReplicatePredictionStatus::Canceled => "canceled".to_string(),
        }
    }

    pub fn is_terminal(status: &str) -> bool {
        status == Self::Succeeded.value()
            || status == Self::Failed.value()
            || status == Self::Canceled.value()
    }
}
