use serde::{Deserialize, Serialize};

use crate::links::city_image_url;

const LOADING_OPACITY: f64 = 0.2;
const RESTING_SCALE: f64 = 1.02;

/// Visual state of the backdrop element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackdropStyle {
    pub opacity: f64,
    pub scale: f64,
    pub image: Option<String>,
}

impl BackdropStyle {
    pub fn cleared() -> Self {
        Self {
            opacity: 0.0,
            scale: RESTING_SCALE,
            image: None,
        }
    }

    pub fn transform_css(&self) -> String {
        format!("scale({})", self.scale)
    }

    pub fn background_css(&self) -> String {
        self.image
            .as_deref()
            .map(|url| format!("url('{url}')"))
            .unwrap_or_default()
    }
}

impl Default for BackdropStyle {
    fn default() -> Self {
        Self::cleared()
    }
}

/// Identifies one preload. Only the newest token is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadRequest {
    pub url: String,
    pub token: LoadToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Starts an off-screen image load and later reports it through
/// [`BackdropLoader::finish`].
pub trait ImageLoader {
    fn load_image(&mut self, request: PreloadRequest);
}

#[derive(Debug, Default)]
pub struct BackdropLoader {
    style: BackdropStyle,
    generation: u64,
    pending: Option<PreloadRequest>,
}

impl BackdropLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self) -> &BackdropStyle {
        &self.style
    }

    /// Points the backdrop at `city`. A blank name clears it without any
    /// network request; otherwise the element fades down and one preload is
    /// issued.
    pub fn set_backdrop<L: ImageLoader + ?Sized>(&mut self, city: &str, loader: &mut L) {
        self.generation += 1;
        let name = city.trim();
        if name.is_empty() {
            self.pending = None;
            self.style = BackdropStyle::cleared();
            return;
        }

        let request = PreloadRequest {
            url: city_image_url(name),
            token: LoadToken(self.generation),
        };
        self.style.opacity = LOADING_OPACITY;
        self.style.scale = RESTING_SCALE;
        self.pending = Some(request.clone());
        tracing::debug!(url = %request.url, "preloading city backdrop");
        loader.load_image(request);
    }

    /// Applies a finished preload. Returns `false` when the token was
    /// superseded and the result was dropped.
    pub fn finish(&mut self, token: LoadToken, outcome: LoadOutcome) -> bool {
        let Some(pending) = self.pending.take_if(|p| p.token == token) else {
            return false;
        };
        match outcome {
            LoadOutcome::Loaded => {
                self.style = BackdropStyle {
                    opacity: 1.0,
                    scale: 1.0,
                    image: Some(pending.url),
                };
            }
            LoadOutcome::Failed => {
                tracing::debug!(url = %pending.url, "city backdrop failed to load");
                self.style.opacity = 0.0;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingLoader {
        requests: Vec<PreloadRequest>,
    }

    impl ImageLoader for CountingLoader {
        fn load_image(&mut self, request: PreloadRequest) {
            self.requests.push(request);
        }
    }

    #[test]
    fn test_blank_city_clears_without_loading() {
        let mut loader = CountingLoader::default();
        let mut backdrop = BackdropLoader::new();
        backdrop.set_backdrop("   ", &mut loader);
        assert!(loader.requests.is_empty());
        assert_eq!(backdrop.style(), &BackdropStyle::cleared());
    }

    #[test]
    fn test_one_load_per_call() {
        let mut loader = CountingLoader::default();
        let mut backdrop = BackdropLoader::new();
        backdrop.set_backdrop("Paris", &mut loader);
        assert_eq!(loader.requests.len(), 1);
        assert_eq!(backdrop.style().opacity, 0.2);
        assert_eq!(backdrop.style().scale, 1.02);
        assert_eq!(loader.requests[0].url, city_image_url("Paris"));
    }

    #[test]
    fn test_loaded_image_fades_in() {
        let mut loader = CountingLoader::default();
        let mut backdrop = BackdropLoader::new();
        backdrop.set_backdrop("Paris", &mut loader);
        let token = loader.requests[0].token;
        assert!(backdrop.finish(token, LoadOutcome::Loaded));
        let style = backdrop.style();
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.scale, 1.0);
        assert_eq!(style.background_css(), format!("url('{}')", city_image_url("Paris")));
        assert!(!backdrop.finish(token, LoadOutcome::Loaded), "token is single use");
    }

    #[test]
    fn test_failed_image_hides_element() {
        let mut loader = CountingLoader::default();
        let mut backdrop = BackdropLoader::new();
        backdrop.set_backdrop("Atlantis", &mut loader);
        backdrop.finish(loader.requests[0].token, LoadOutcome::Failed);
        assert_eq!(backdrop.style().opacity, 0.0);
    }

    #[test]
    fn test_stale_loads_are_ignored() {
        let mut loader = CountingLoader::default();
        let mut backdrop = BackdropLoader::new();
        backdrop.set_backdrop("Paris", &mut loader);
        backdrop.set_backdrop("Berlin", &mut loader);
        let (paris, berlin) = (loader.requests[0].token, loader.requests[1].token);
        assert!(!backdrop.finish(paris, LoadOutcome::Loaded));
        assert!(backdrop.finish(berlin, LoadOutcome::Loaded));
        assert_eq!(backdrop.style().image.as_deref(), Some(city_image_url("Berlin").as_str()));
    }

    #[test]
    fn test_clear_cancels_pending_load() {
        let mut loader = CountingLoader::default();
        let mut backdrop = BackdropLoader::new();
        backdrop.set_backdrop("Paris", &mut loader);
        backdrop.set_backdrop("", &mut loader);
        assert!(!backdrop.finish(loader.requests[0].token, LoadOutcome::Loaded));
        assert_eq!(backdrop.style().opacity, 0.0);
    }
}
