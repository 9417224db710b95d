/// Use cases module containing application business logic orchestration
mod analyze_ecosystem;

pub use analyze_ecosystem::AnalyzeEcosystemUseCase;
