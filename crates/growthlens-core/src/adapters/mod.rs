mod fixture;
mod gemini;

pub use fixture::FixtureAdapter;
pub use gemini::GeminiAdapter;
