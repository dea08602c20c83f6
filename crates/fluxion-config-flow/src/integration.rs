// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Registration of the dynamic grid prices flows with a host registry

use crate::consts::{DOMAIN, FLOW_VERSION};
use crate::errors::Result;
use crate::options_flow::OptionsFlow;
use crate::registry::{
    ConfigFlowHandler, ConnectionClass, FlowRegistration, FlowRegistry, OptionsFlowHandler,
};
use crate::setup_flow::SetupFlow;
use fluxion_price_feeds::{
    EcopowerCredentials, EcopowerProbe, EntsoeCredentials, EntsoeProbe, SampleFetcher,
};
use std::sync::Arc;

/// Register the setup and options flows, checking tokens with `entsoe` and `ecopower`
pub fn register(
    registry: &mut FlowRegistry,
    entsoe: Arc<dyn SampleFetcher<EntsoeCredentials>>,
    ecopower: Arc<dyn SampleFetcher<EcopowerCredentials>>,
) -> Result<()> {
    let setup = move || {
        Box::new(SetupFlow::new(Arc::clone(&entsoe), Arc::clone(&ecopower)))
            as Box<dyn ConfigFlowHandler>
    };
    let registration =
        FlowRegistration::new(DOMAIN, FLOW_VERSION, ConnectionClass::CloudPoll, setup)
            .with_options(|entry| {
                Box::new(OptionsFlow::new(entry)) as Box<dyn OptionsFlowHandler>
            });

    registry.register(registration)
}

/// Register with live probes against the given API base URLs
pub fn register_live(
    registry: &mut FlowRegistry,
    entsoe_url: &str,
    ecopower_url: &str,
) -> Result<()> {
    register(
        registry,
        Arc::new(EntsoeProbe::new(entsoe_url)),
        Arc::new(EcopowerProbe::new(ecopower_url)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FlowError;

    #[test]
    fn test_register_live() {
        let mut registry = FlowRegistry::new();
        register_live(&mut registry, "http://localhost:1", "http://localhost:2").unwrap();

        let registration = registry.get(DOMAIN).unwrap();
        assert_eq!(registration.version, FLOW_VERSION);
        assert_eq!(registration.connection_class, ConnectionClass::CloudPoll);
        assert!(registration.supports_options());
    }

    #[test]
    fn test_register_twice_fails() {
        let mut registry = FlowRegistry::new();
        register_live(&mut registry, "http://localhost:1", "http://localhost:2").unwrap();

        assert!(matches!(
            register_live(&mut registry, "http://localhost:1", "http://localhost:2"),
            Err(FlowError::DuplicateDomain(_))
        ));
    }
}
