//! Native-denominated token prices composed from two stable-quoted legs.

use std::sync::Arc;

use cyclo_core::fixed_point::pow10;
use cyclo_core::price::leg_or_parity;
use cyclo_core::{
    decimal_adjustment, derive_native_price, LegScale, NetworkConfig, Token, FIXED_POINT_DECIMALS,
    ONE,
};
use primitive_types::U256;

use crate::quoter::{quote_with_fee_fallback, Quoter};

/// Raw leg outputs; `None` means both fee tiers failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLegs {
    pub target_in_stable: Option<U256>,
    pub native_in_stable: Option<U256>,
}

/// Prices tokens of one network against its native gas token.
pub struct NativePriceFeed<Q: ?Sized> {
    quoter: Arc<Q>,
    native: Token,
    stable: Token,
}

impl<Q: Quoter + ?Sized> NativePriceFeed<Q> {
    pub fn new(quoter: Arc<Q>, network: &NetworkConfig) -> Self {
        Self {
            quoter,
            native: network.native_token(),
            stable: network.stable_token(),
        }
    }

    pub fn native(&self) -> &Token {
        &self.native
    }

    pub fn is_native(&self, token: &Token) -> bool {
        token.native_address.eq_ignore_ascii_case(&self.native.native_address)
    }

    /// Quote one whole `token` and one whole native token into the stable,
    /// concurrently.
    pub async fn quote_legs(&self, token: &Token) -> PriceLegs {
        let target = quote_with_fee_fallback(
            self.quoter.as_ref(),
            &token.native_address,
            &self.stable.native_address,
            pow10(u32::from(token.decimals)),
        );
        let native = quote_with_fee_fallback(
            self.quoter.as_ref(),
            &self.native.native_address,
            &self.stable.native_address,
            pow10(u32::from(self.native.decimals)),
        );
        let (target_in_stable, native_in_stable) = tokio::join!(target, native);
        PriceLegs {
            target_in_stable,
            native_in_stable,
        }
    }

    /// Price of one whole `token` in native units at 18 decimals.
    /// A failed leg is replaced by 1:1 parity; this never errors.
    pub async fn price_in_native(&self, token: &Token) -> U256 {
        if self.is_native(token) {
            return ONE;
        }
        let target_scale = LegScale::whole_unit(token.decimals, self.stable.decimals);
        let native_scale = LegScale::whole_unit(self.native.decimals, self.stable.decimals);

        match self.quote_legs(token).await {
            PriceLegs {
                target_in_stable: Some(target),
                native_in_stable: Some(native),
            } => derive_native_price(target, native, decimal_adjustment(target_scale, native_scale)),
            legs => {
                log::warn!(
                    "{}: price leg unavailable (target {:?}, native {:?}), using parity",
                    token.symbol,
                    legs.target_in_stable,
                    legs.native_in_stable
                );
                // Parity is only meaningful once both legs sit at 18 decimals
                derive_native_price(
                    leg_or_parity(legs.target_in_stable.map(|t| target_scale.normalize(t))),
                    leg_or_parity(legs.native_in_stable.map(|n| native_scale.normalize(n))),
                    i32::from(FIXED_POINT_DECIMALS),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quoter::{FeeTier, StaticQuoter};
    use cyclo_core::CycloConfig;

    const WFLR: &str = "0x1D80c49BbBCd1C0911346656B529DF9E5c2F783d";
    const USDCE: &str = "0xFbDa5F676cB37624f28265A144A48B0d6e87d3b6";
    const CYWETH: &str = "0xd8BF1d2720E9fFD01a2F9A2eFc3E101a05B852b4";

    fn flare() -> NetworkConfig {
        CycloConfig::builtin().network("flare").unwrap().clone()
    }

    fn whole(decimals: u32) -> U256 {
        pow10(decimals)
    }

    #[tokio::test]
    async fn test_price_through_stable() {
        // 1 WETH = 2,500 USDC.e, 1 FLR = 0.025 USDC.e
        let quoter = StaticQuoter::new()
            .with_quote(CYWETH, USDCE, FeeTier::Primary, whole(18), U256::from(2_500_000_000u64))
            .with_quote(WFLR, USDCE, FeeTier::Secondary, whole(18), U256::from(25_000u64));
        let network = flare();
        let feed = NativePriceFeed::new(Arc::new(quoter), &network);

        let token = network.token_set().unwrap().require("cyWETH").unwrap().clone();
        let price = feed.price_in_native(&token).await;
        assert_eq!(price, U256::from(100_000u64) * ONE);
    }

    #[tokio::test]
    async fn test_native_token_is_one() {
        let network = flare();
        let feed = NativePriceFeed::new(Arc::new(StaticQuoter::new()), &network);
        let native = network.native_token();
        assert_eq!(feed.price_in_native(&native).await, ONE);
    }

    #[tokio::test]
    async fn test_failed_native_leg_uses_parity() {
        // Native leg missing: 1 WETH = 2,500 USDC.e against 1 FLR = 1 USDC.e
        let quoter = StaticQuoter::new().with_quote(
            CYWETH,
            USDCE,
            FeeTier::Primary,
            whole(18),
            U256::from(2_500_000_000u64),
        );
        let network = flare();
        let feed = NativePriceFeed::new(Arc::new(quoter), &network);
        let token = network.token_set().unwrap().require("cyWETH").unwrap().clone();

        let legs = feed.quote_legs(&token).await;
        assert_eq!(legs.target_in_stable, Some(U256::from(2_500_000_000u64)));
        assert_eq!(legs.native_in_stable, None);

        assert_eq!(feed.price_in_native(&token).await, U256::from(2_500u64) * ONE);
    }

    #[tokio::test]
    async fn test_failed_target_leg_uses_parity() {
        // cyWETH leg missing: 1 USDC.e against 1 FLR = 0.025 USDC.e → 40 FLR
        let quoter = StaticQuoter::new().with_quote(
            WFLR,
            USDCE,
            FeeTier::Primary,
            whole(18),
            U256::from(25_000u64),
        );
        let network = flare();
        let feed = NativePriceFeed::new(Arc::new(quoter), &network);
        let token = network.token_set().unwrap().require("cyWETH").unwrap().clone();

        assert_eq!(feed.price_in_native(&token).await, U256::from(40u64) * ONE);
    }

    #[tokio::test]
    async fn test_both_legs_failed_is_one() {
        let network = flare();
        let feed = NativePriceFeed::new(Arc::new(StaticQuoter::new()), &network);
        let token = network.token_set().unwrap().require("cysFLR").unwrap().clone();
        assert_eq!(feed.price_in_native(&token).await, ONE);
    }

    #[tokio::test]
    async fn test_six_decimal_token() {
        // cyFXRP (6 dec): 1 token = 2 USDC.e; 1 FLR = 0.02 USDC.e → 100 FLR
        let network = flare();
        let fxrp = network.token_set().unwrap().require("cyFXRP").unwrap().clone();
        let quoter = StaticQuoter::new()
            .with_quote(&fxrp.native_address, USDCE, FeeTier::Primary, whole(6), U256::from(2_000_000u64))
            .with_quote(WFLR, USDCE, FeeTier::Primary, whole(18), U256::from(20_000u64));
        let feed = NativePriceFeed::new(Arc::new(quoter), &network);
        assert_eq!(feed.price_in_native(&fxrp).await, U256::from(100u64) * ONE);
    }
}
