/// Parsers for the text and JSON artifacts external tools leave behind
mod bundler_libyear;
mod gemfile_ownerships;
mod npm_libyear;
mod package_json_ownerships;

pub use bundler_libyear::BundlerLibyearParser;
pub use gemfile_ownerships::GemfileOwnershipParser;
pub use npm_libyear::NpmLibyearParser;
pub use package_json_ownerships::PackageJsonOwnershipParser;
