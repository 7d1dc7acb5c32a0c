// ═══════════════════════════════════════════════════════════════════
// Provider Tests — FeedRegistry fallback and CoinCap symbol mapping
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::collections::HashMap;

use toman_tracker_core::errors::CoreError;
use toman_tracker_core::providers::coincap::CoinCapFeed;
use toman_tracker_core::providers::registry::FeedRegistry;
use toman_tracker_core::providers::traits::PriceFeed;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers — Mock Feeds
// ═══════════════════════════════════════════════════════════════════

/// A mock feed that returns a fixed price for every requested symbol.
struct MockFeed {
    name: String,
    price: f64,
}

impl MockFeed {
    fn new(name: &str, price: f64) -> Self {
        Self {
            name: name.to_string(),
            price,
        }
    }
}

#[async_trait]
impl PriceFeed for MockFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_crypto_usd(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, f64>, CoreError> {
        Ok(symbols
            .iter()
            .map(|s| (s.to_uppercase(), self.price))
            .collect())
    }
}

/// A mock feed that always fails.
struct FailingFeed {
    name: String,
}

impl FailingFeed {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl PriceFeed for FailingFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_crypto_usd(
        &self,
        _symbols: &[String],
    ) -> Result<HashMap<String, f64>, CoreError> {
        Err(CoreError::Api {
            feed: self.name.clone(),
            message: "simulated outage".into(),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════
// FeedRegistry — Construction
// ═══════════════════════════════════════════════════════════════════

mod registry_construction {
    use super::*;

    #[test]
    fn new_creates_empty_registry() {
        let registry = FeedRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.feed_names().is_empty());
    }

    #[test]
    fn default_creates_empty_registry() {
        let registry = FeedRegistry::default();
        assert!(registry.is_empty());
    }

    #[test]
    fn register_single_feed() {
        let mut registry = FeedRegistry::new();
        registry.register(Box::new(MockFeed::new("Mock", 1.0)));
        assert!(!registry.is_empty());
        assert_eq!(registry.feed_names(), vec!["Mock"]);
    }

    #[test]
    fn feed_names_preserve_registration_order() {
        let mut registry = FeedRegistry::new();
        registry.register(Box::new(MockFeed::new("A", 1.0)));
        registry.register(Box::new(MockFeed::new("B", 2.0)));
        registry.register(Box::new(MockFeed::new("C", 3.0)));
        assert_eq!(registry.feed_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn defaults_register_coincap() {
        let registry = FeedRegistry::new_with_defaults();
        assert_eq!(registry.feed_names(), vec!["CoinCap"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FeedRegistry — fetch fallback chain
// ═══════════════════════════════════════════════════════════════════

mod registry_fallback {
    use super::*;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn empty_registry_reports_no_feed() {
        let registry = FeedRegistry::new();
        match registry.fetch_crypto_usd(&symbols(&["BTC"])).await {
            Err(CoreError::NoFeed) => {}
            other => panic!("Expected NoFeed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn first_feed_wins() {
        let mut registry = FeedRegistry::new();
        registry.register(Box::new(MockFeed::new("Primary", 100.0)));
        registry.register(Box::new(MockFeed::new("Backup", 999.0)));

        let prices = registry.fetch_crypto_usd(&symbols(&["BTC"])).await.unwrap();
        assert_eq!(prices.get("BTC"), Some(&100.0));
    }

    #[tokio::test]
    async fn falls_back_past_failing_feed() {
        let mut registry = FeedRegistry::new();
        registry.register(Box::new(FailingFeed::new("Broken")));
        registry.register(Box::new(MockFeed::new("Backup", 42.0)));

        let prices = registry
            .fetch_crypto_usd(&symbols(&["ETH", "ADA"]))
            .await
            .unwrap();
        assert_eq!(prices.get("ETH"), Some(&42.0));
        assert_eq!(prices.get("ADA"), Some(&42.0));
    }

    #[tokio::test]
    async fn all_feeds_failing_surfaces_last_error() {
        let mut registry = FeedRegistry::new();
        registry.register(Box::new(FailingFeed::new("First")));
        registry.register(Box::new(FailingFeed::new("Second")));

        match registry.fetch_crypto_usd(&symbols(&["BTC"])).await {
            Err(CoreError::Api { feed, .. }) => assert_eq!(feed, "Second"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn uppercases_returned_symbols() {
        let mut registry = FeedRegistry::new();
        registry.register(Box::new(MockFeed::new("Mock", 7.0)));

        let prices = registry.fetch_crypto_usd(&symbols(&["btc"])).await.unwrap();
        assert_eq!(prices.get("BTC"), Some(&7.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
// CoinCapFeed — resolve_id and trait impl
// ═══════════════════════════════════════════════════════════════════

mod coincap {
    use super::*;

    #[test]
    fn name() {
        let feed = CoinCapFeed::new();
        assert_eq!(feed.name(), "CoinCap");
    }

    #[test]
    fn default_trait() {
        let feed = CoinCapFeed::default();
        assert_eq!(feed.name(), "CoinCap");
    }

    #[test]
    fn resolve_id_btc() {
        let feed = CoinCapFeed::new();
        assert_eq!(feed.resolve_id("BTC"), "bitcoin");
    }

    #[test]
    fn resolve_id_eth() {
        let feed = CoinCapFeed::new();
        assert_eq!(feed.resolve_id("ETH"), "ethereum");
    }

    #[test]
    fn resolve_id_lowercase_input() {
        let feed = CoinCapFeed::new();
        assert_eq!(feed.resolve_id("btc"), "bitcoin");
    }

    #[test]
    fn resolve_id_mixed_case_input() {
        let feed = CoinCapFeed::new();
        assert_eq!(feed.resolve_id("Btc"), "bitcoin");
    }

    #[test]
    fn resolve_id_unknown_falls_back_to_lowercase() {
        let feed = CoinCapFeed::new();
        assert_eq!(feed.resolve_id("UNKNOWN"), "unknown");
    }

    #[test]
    fn resolve_id_all_common_symbols() {
        let feed = CoinCapFeed::new();
        let expected = vec![
            ("BTC", "bitcoin"),
            ("ETH", "ethereum"),
            ("USDT", "tether"),
            ("USDC", "usd-coin"),
            ("BNB", "binance-coin"),
            ("XRP", "xrp"),
            ("ADA", "cardano"),
            ("SOL", "solana"),
            ("DOGE", "dogecoin"),
            ("DOT", "polkadot"),
            ("LTC", "litecoin"),
            ("AVAX", "avalanche"),
            ("LINK", "chainlink"),
            ("ATOM", "cosmos"),
            ("XLM", "stellar"),
            ("TRX", "tron"),
            ("ETC", "ethereum-classic"),
            ("XMR", "monero"),
            ("SHIB", "shiba-inu"),
            ("FIL", "filecoin"),
        ];
        for (sym, id) in expected {
            assert_eq!(feed.resolve_id(sym), id, "Failed for symbol: {}", sym);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Feed trait compliance
// ═══════════════════════════════════════════════════════════════════

mod trait_compliance {
    use super::*;

    /// Verify all feeds implement Send + Sync (required by async-trait).
    #[test]
    fn feeds_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<CoinCapFeed>();
        assert_send_sync::<MockFeed>();
        assert_send_sync::<FeedRegistry>();
    }

    /// Verify feeds can be stored as trait objects in the registry.
    #[test]
    fn feeds_as_trait_objects() {
        let mut registry = FeedRegistry::new();
        registry.register(Box::new(CoinCapFeed::new()));
        registry.register(Box::new(MockFeed::new("Extra", 1.0)));

        assert_eq!(registry.feed_names(), vec!["CoinCap", "Extra"]);
    }
}
