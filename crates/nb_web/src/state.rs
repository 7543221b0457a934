use nb_feed::NewsBrowser;

pub struct AppState {
    pub browser: NewsBrowser,
}
