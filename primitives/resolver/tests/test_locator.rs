//! Consumer-side tests for the locator.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use registry::{ArtifactHandler, HandlerRegistry};
use resolver::{ArtifactLocator, ArtifactRequest, ArtifactResolver, ResolutionError};
use types::ArtifactCoordinate;

/// Resolver that records requests and serves paths from a fixed table
#[derive(Default)]
struct RecordingResolver {
    seen: Mutex<Vec<ArtifactRequest>>,
}

impl ArtifactResolver for RecordingResolver {
    fn resolve(&self, request: &ArtifactRequest) -> Result<PathBuf, ResolutionError> {
        self.seen.lock().expect("lock").push(request.clone());
        if request.name == "missing" {
            return Err(ResolutionError::NotFound {
                request: request.clone(),
                probed: PathBuf::from("/repo/missing"),
            });
        }
        Ok(PathBuf::from(format!("/repo/{}.{}", request.name, request.extension)))
    }
}

fn locator(resolver: Arc<RecordingResolver>) -> ArtifactLocator {
    ArtifactLocator::new(resolver, Arc::new(HandlerRegistry::with_defaults()))
}

#[test]
fn registered_type_maps_to_handler_extension() {
    let resolver = Arc::new(RecordingResolver::default());
    let coordinate = ArtifactCoordinate::new("com.example", "api", "1.0").with_kind("test-jar");
    let path = locator(resolver.clone()).locate(&coordinate).expect("resolves");

    assert_eq!(path, PathBuf::from("/repo/api.jar"));
    let seen = resolver.seen.lock().expect("lock");
    assert_eq!(seen[0].extension, "jar");
    assert_eq!(seen[0].classifier.as_deref(), Some("tests"));
}

#[test]
fn unregistered_type_is_used_verbatim() {
    let resolver = Arc::new(RecordingResolver::default());
    let coordinate = ArtifactCoordinate::new("com.example", "api", "1.0").with_kind("tar.gz");
    let path = locator(resolver).locate(&coordinate).expect("resolves");
    assert_eq!(path, PathBuf::from("/repo/api.tar.gz"));
}

#[test]
fn explicit_classifier_wins_over_handler() {
    let mut handlers = HandlerRegistry::new();
    handlers.insert(ArtifactHandler::new("bundle", "zip").with_classifier("bundle"));
    let resolver = Arc::new(RecordingResolver::default());
    let locator = ArtifactLocator::new(resolver.clone(), Arc::new(handlers));

    let coordinate = ArtifactCoordinate::new("g", "api", "1").with_kind("bundle").with_classifier("schemas");
    locator.locate(&coordinate).expect("resolves");
    assert_eq!(resolver.seen.lock().expect("lock")[0].classifier.as_deref(), Some("schemas"));
}

#[test]
fn resolver_errors_propagate() {
    let resolver = Arc::new(RecordingResolver::default());
    let err = locator(resolver)
        .locate(&ArtifactCoordinate::new("g", "missing", "1"))
        .expect_err("should fail");
    assert!(matches!(err, ResolutionError::NotFound { .. }));
    assert!(err.to_string().contains("g:missing:jar:1"));
}

#[test]
fn blank_group_is_rejected_before_resolving() {
    let resolver = Arc::new(RecordingResolver::default());
    let err = locator(resolver.clone())
        .locate(&ArtifactCoordinate::new("", "api", "1"))
        .expect_err("should fail");
    assert!(matches!(err, ResolutionError::InvalidCoordinate { .. }));
    assert!(resolver.seen.lock().expect("lock").is_empty());
}
