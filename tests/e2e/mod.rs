// End-to-end integration tests for the podcast generator API
//
// Each test gets its own server bound to 127.0.0.1:0 with output and upload
// directories inside a fresh temporary directory. The speech provider is an
// in-process fake, so tests run in parallel without AWS credentials.

mod test_health;
mod test_polly;
