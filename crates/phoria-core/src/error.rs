//! Island runtime error types.
//!
//! Every failure the runtime can surface is a variant of [`IslandError`].
//! Variants group into four classes (see [`ErrorKind`]): configuration
//! bugs (a framework or service was never registered), request-time
//! not-found conditions, request validation failures, and errors raised
//! by a wrapped framework's own rendering.

use thiserror::Error;

/// Result type for island runtime operations.
pub type IslandResult<T> = Result<T, IslandError>;

/// Island runtime errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IslandError {
	/// Component registration referenced a framework that was never registered.
	#[error("unknown framework '{framework}' for component '{component}'")]
	UnknownFramework {
		/// Framework name as given at registration.
		framework: String,
		/// Component being registered.
		component: String,
	},

	/// A service registry was asked about a framework that was never registered.
	#[error("framework not registered: {0}")]
	FrameworkNotRegistered(String),

	/// Component not present in the component registry.
	#[error("component not found: {0}")]
	ComponentNotFound(String),

	/// Render request carried no component name.
	#[error("no component name supplied in render request")]
	MissingComponent,

	/// Island element has no `component` attribute.
	#[error("island element is missing the 'component' attribute")]
	MissingComponentAttribute,

	/// Default-loader module has no `default` export.
	#[error(
		"module for component '{0}' has no default export; register a named loader with a component selector instead"
	)]
	MissingDefaultExport(String),

	/// Named-loader selector produced no implementation.
	#[error("named loader for component '{0}' selected no export from its module")]
	MissingNamedExport(String),

	/// No CSR mount service registered for the component's framework.
	#[error("no CSR service registered for framework: {0}")]
	CsrServiceNotFound(String),

	/// No SSR render service registered for the component's framework.
	#[error("no SSR service registered for framework: {0}")]
	SsrServiceNotFound(String),

	/// `client:media` directive present without a media query value.
	#[error("'client:media' directive on component '{0}' requires a media query value")]
	MissingMediaQuery(String),

	/// The `client:media` query could not be evaluated.
	#[error("media query '{query}' could not be evaluated: {message}")]
	InvalidMediaQuery {
		/// The offending query.
		query: String,
		/// Underlying failure description.
		message: String,
	},

	/// Island element carries no client directive attribute.
	#[error("no client directive found on island element for component '{0}'")]
	NoDirectiveFound(String),

	/// Props payload was not an absent/null body or a JSON object.
	#[error("invalid props: {0}")]
	InvalidProps(String),

	/// A module loader operation failed.
	#[error("loader for component '{component}' failed: {message}")]
	Loader {
		/// Component whose loader failed.
		component: String,
		/// Underlying failure description.
		message: String,
	},

	/// The wrapped framework's own rendering raised an error.
	#[error("rendering component '{component}' with framework '{framework}' failed: {message}")]
	Render {
		/// Component being rendered.
		component: String,
		/// Framework whose adapter failed.
		framework: String,
		/// Underlying failure description.
		message: String,
	},
}

/// Coarse classification of an [`IslandError`].
///
/// The server edge maps kinds onto HTTP status classes; the client logs
/// them. No variant is ever silently retried by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// A caller bug: something was never registered. Fatal to the operation.
	Configuration,
	/// Request-time miss: the named component does not exist.
	NotFound,
	/// The request (props, attributes, directives) is malformed.
	Validation,
	/// Loading or rendering the component implementation failed.
	Render,
}

impl ErrorKind {
	/// Stable lowercase name, used in structured error payloads.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Configuration => "configuration",
			Self::NotFound => "not_found",
			Self::Validation => "validation",
			Self::Render => "render",
		}
	}
}

impl IslandError {
	/// Classifies this error into the runtime taxonomy.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::UnknownFramework { .. }
			| Self::FrameworkNotRegistered(_)
			| Self::CsrServiceNotFound(_)
			| Self::SsrServiceNotFound(_)
			| Self::MissingDefaultExport(_)
			| Self::MissingNamedExport(_) => ErrorKind::Configuration,
			Self::ComponentNotFound(_) => ErrorKind::NotFound,
			Self::MissingComponent
			| Self::MissingComponentAttribute
			| Self::MissingMediaQuery(_)
			| Self::InvalidMediaQuery { .. }
			| Self::NoDirectiveFound(_)
			| Self::InvalidProps(_) => ErrorKind::Validation,
			Self::Loader { .. } | Self::Render { .. } => ErrorKind::Render,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn configuration_errors_are_classified_as_configuration() {
		let err = IslandError::UnknownFramework {
			framework: "demo".into(),
			component: "widget".into(),
		};
		assert_eq!(err.kind(), ErrorKind::Configuration);
		assert_eq!(
			IslandError::SsrServiceNotFound("demo".into()).kind(),
			ErrorKind::Configuration
		);
	}

	#[test]
	fn request_time_errors_keep_their_classes() {
		assert_eq!(
			IslandError::ComponentNotFound("widget".into()).kind(),
			ErrorKind::NotFound
		);
		assert_eq!(
			IslandError::InvalidProps("array body".into()).kind(),
			ErrorKind::Validation
		);
		let err = IslandError::Render {
			component: "widget".into(),
			framework: "demo".into(),
			message: "boom".into(),
		};
		assert_eq!(err.kind(), ErrorKind::Render);
	}

	#[test]
	fn default_export_error_names_the_component_and_gives_guidance() {
		let err = IslandError::MissingDefaultExport("widget".into());
		let msg = err.to_string();
		assert!(msg.contains("widget"));
		assert!(msg.contains("named loader"));
	}
}
