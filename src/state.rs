use crate::observability::metrics::Metrics;
use crate::store::SolicitudGateway;
use crate::suggest::AddressSuggester;

pub struct AppState {
    pub gateway: SolicitudGateway,
    pub suggester: AddressSuggester,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(gateway: SolicitudGateway, suggester: AddressSuggester) -> Self {
        Self {
            gateway,
            suggester,
            metrics: Metrics::new(),
        }
    }
}
