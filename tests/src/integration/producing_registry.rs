//! Producing registry flows: onboarding, reading history, activity
//! toggling, meter replacement, and the rotation gate.

#[cfg(test)]
mod tests {
    use crate::support::{accounts, addr, contracts, deploy_stack, rand_addr, Stack};
    use asset_registry::domain::entities::{Co2Reading, NewAsset, ProducingReadExtra};
    use asset_registry::events::{AuditEvent, AuditEventKind};
    use asset_registry::RegistryError;
    use shared_types::{Address, AssetId};

    fn new_asset() -> NewAsset {
        NewAsset {
            smart_meter: addr(accounts::SMART_METER),
            owner: addr(accounts::ASSET_OWNER),
            matchers: vec![addr(accounts::MATCHER)],
            properties_document_hash: "propertiesDocumentHash".to_owned(),
            url: "url".to_owned(),
        }
    }

    fn onboard(stack: &Stack) -> AssetId {
        stack
            .producing
            .create_asset(stack.deployer, new_asset(), 2)
            .expect("onboarding")
    }

    fn submit(stack: &Stack, id: AssetId, read: u64) {
        stack
            .producing
            .save_smart_meter_read(
                addr(accounts::SMART_METER),
                id,
                read,
                false,
                "lastSmartMeterReadFileHash",
                ProducingReadExtra {
                    new_co2_read: read,
                    service_down: false,
                },
            )
            .expect("accepted reading");
    }

    #[test]
    fn deploys_with_the_right_wiring() {
        let stack = deploy_stack();

        assert_eq!(stack.producing.owner(), stack.lookup.address());
        assert_eq!(
            stack.lookup.producing_registry().unwrap(),
            stack.producing.address()
        );
        assert_eq!(
            stack.producing.store_owner().unwrap(),
            stack.producing.address()
        );
        assert_eq!(stack.producing.asset_count().unwrap(), 0);
    }

    #[test]
    fn rejects_onboarding_without_the_manager_role() {
        let stack = deploy_stack();

        for caller in [rand_addr(), addr(accounts::ASSET_OWNER)] {
            let err = stack
                .producing
                .create_asset(caller, new_asset(), 2)
                .unwrap_err();
            assert_eq!(err, RegistryError::Unauthorized { account: caller });
        }
        assert_eq!(stack.producing.asset_count().unwrap(), 0);
        assert!(stack.producing_audit.is_empty());
    }

    #[test]
    fn onboards_a_new_asset() {
        let stack = deploy_stack();
        let id = onboard(&stack);

        assert_eq!(id, 0);
        assert_eq!(stack.producing.asset_count().unwrap(), 1);
        assert_eq!(
            stack.producing_audit.latest().unwrap(),
            AuditEvent::AssetCreated {
                sender: stack.deployer,
                asset_id: 0,
            }
        );
    }

    #[test]
    fn returns_the_onboarded_record_correctly() {
        let stack = deploy_stack();
        let id = onboard(&stack);
        let asset = stack.producing.asset(id).unwrap();

        assert_eq!(asset.id, 0);
        assert_eq!(asset.smart_meter, addr(accounts::SMART_METER));
        assert_eq!(asset.owner, addr(accounts::ASSET_OWNER));
        assert_eq!(asset.last_read_wh, 0);
        assert!(asset.active);
        assert_eq!(asset.last_read_file_hash, "");
        assert_eq!(asset.matchers.as_slice(), &[addr(accounts::MATCHER)]);
        assert_eq!(asset.last_certificate_quantity_wh, 0);
        assert_eq!(asset.details.last_co2_offset_read, 0);
        assert_eq!(asset.details.max_owner_changes, 2);
        assert_eq!(asset.properties_document_hash, "propertiesDocumentHash");
        assert_eq!(asset.url, "url");
        assert_eq!(asset.market_lookup, Address::ZERO);
    }

    #[test]
    fn rejects_readings_from_the_wrong_smart_meter() {
        let stack = deploy_stack();
        let id = onboard(&stack);

        let err = stack
            .producing
            .save_smart_meter_read(
                addr(accounts::STRANGER),
                id,
                100,
                false,
                "lastSmartMeterReadFileHash",
                ProducingReadExtra {
                    new_co2_read: 100,
                    service_down: false,
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::WrongSender {
                id,
                caller: addr(accounts::STRANGER),
            }
        );
        assert_eq!(stack.producing.asset(id).unwrap().last_read_wh, 0);
    }

    #[test]
    fn accepts_monotone_readings_and_reports_the_previous_delta() {
        let stack = deploy_stack();
        let id = onboard(&stack);

        submit(&stack, id, 100);
        assert_eq!(
            stack.producing_audit.latest().unwrap(),
            AuditEvent::NewMeterRead {
                asset_id: id,
                old_read_wh: 0,
                new_read_wh: 100,
                certificate_quantity_wh: 0,
                meter_down: false,
                co2: Some(Co2Reading {
                    old_read: 0,
                    new_read: 100,
                    service_down: false,
                }),
            }
        );

        submit(&stack, id, 200);
        assert_eq!(
            stack.producing_audit.latest().unwrap(),
            AuditEvent::NewMeterRead {
                asset_id: id,
                old_read_wh: 100,
                new_read_wh: 200,
                certificate_quantity_wh: 100,
                meter_down: false,
                co2: Some(Co2Reading {
                    old_read: 100,
                    new_read: 200,
                    service_down: false,
                }),
            }
        );

        // After every accepted reading the record holds this reading's delta
        let asset = stack.producing.asset(id).unwrap();
        assert_eq!(asset.last_read_wh, 200);
        assert_eq!(asset.last_certificate_quantity_wh, 100);
    }

    #[test]
    fn rejects_regressing_wh_and_co2_readings() {
        let stack = deploy_stack();
        let id = onboard(&stack);
        submit(&stack, id, 200);

        let err = stack
            .producing
            .save_smart_meter_read(
                addr(accounts::SMART_METER),
                id,
                50,
                false,
                "lastSmartMeterReadFileHash",
                ProducingReadExtra {
                    new_co2_read: 300,
                    service_down: false,
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::MeterReadRegression {
                last: 200,
                submitted: 50,
            }
        );

        let err = stack
            .producing
            .save_smart_meter_read(
                addr(accounts::SMART_METER),
                id,
                300,
                false,
                "lastSmartMeterReadFileHash",
                ProducingReadExtra {
                    new_co2_read: 50,
                    service_down: false,
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Co2ReadRegression {
                last: 200,
                submitted: 50,
            }
        );

        let asset = stack.producing.asset(id).unwrap();
        assert_eq!(asset.last_read_wh, 200);
        assert_eq!(asset.details.last_co2_offset_read, 200);
        assert_eq!(
            stack
                .producing_audit
                .of_kind(AuditEventKind::NewMeterRead)
                .len(),
            1
        );
    }

    #[test]
    fn bundle_channel_behaves_like_the_single_channel() {
        let stack = deploy_stack();
        let id = onboard(&stack);
        submit(&stack, id, 100);
        submit(&stack, id, 200);

        let err = stack
            .producing
            .save_smart_meter_read_bundle(
                addr(accounts::STRANGER),
                id,
                300,
                false,
                "lastSmartMeterReadFileHash",
                ProducingReadExtra {
                    new_co2_read: 300,
                    service_down: false,
                },
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::WrongSender { .. }));

        stack
            .producing
            .save_smart_meter_read_bundle(
                addr(accounts::SMART_METER),
                id,
                300,
                false,
                "lastSmartMeterReadFileHash",
                ProducingReadExtra {
                    new_co2_read: 300,
                    service_down: false,
                },
            )
            .unwrap();
        assert_eq!(
            stack.producing_audit.latest().unwrap(),
            AuditEvent::NewMeterRead {
                asset_id: id,
                old_read_wh: 200,
                new_read_wh: 300,
                certificate_quantity_wh: 100,
                meter_down: false,
                co2: Some(Co2Reading {
                    old_read: 200,
                    new_read: 300,
                    service_down: false,
                }),
            }
        );

        let err = stack
            .producing
            .save_smart_meter_read_bundle(
                addr(accounts::SMART_METER),
                id,
                50,
                false,
                "lastSmartMeterReadFileHash",
                ProducingReadExtra {
                    new_co2_read: 500,
                    service_down: false,
                },
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::MeterReadRegression { .. }));

        let err = stack
            .producing
            .save_smart_meter_read_bundle(
                addr(accounts::SMART_METER),
                id,
                500,
                false,
                "lastSmartMeterReadFileHash",
                ProducingReadExtra {
                    new_co2_read: 50,
                    service_down: false,
                },
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::Co2ReadRegression { .. }));

        stack
            .producing
            .save_smart_meter_read_bundle(
                addr(accounts::SMART_METER),
                id,
                400,
                false,
                "lastSmartMeterReadFileHash",
                ProducingReadExtra {
                    new_co2_read: 400,
                    service_down: false,
                },
            )
            .unwrap();

        let asset = stack.producing.asset(id).unwrap();
        assert_eq!(asset.last_read_wh, 400);
        assert_eq!(asset.last_certificate_quantity_wh, 100);
        assert_eq!(asset.details.last_co2_offset_read, 400);
    }

    #[test]
    fn full_reading_scenario_keeps_a_constant_delta() {
        let stack = deploy_stack();
        let id = onboard(&stack);

        for read in [100, 200, 300, 400] {
            submit(&stack, id, read);
            let asset = stack.producing.asset(id).unwrap();
            assert_eq!(asset.last_read_wh, read);
            assert_eq!(asset.last_certificate_quantity_wh, 100);
        }

        let err = stack
            .producing
            .save_smart_meter_read(
                addr(accounts::SMART_METER),
                id,
                50,
                false,
                "lastSmartMeterReadFileHash",
                ProducingReadExtra {
                    new_co2_read: 400,
                    service_down: false,
                },
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::MeterReadRegression { .. }));
    }

    #[test]
    fn deactivation_gates_both_channels() {
        let stack = deploy_stack();
        let id = onboard(&stack);

        let err = stack
            .producing
            .set_active(addr(accounts::STRANGER), id, false)
            .unwrap_err();
        assert!(matches!(err, RegistryError::Unauthorized { .. }));

        stack.producing.set_active(stack.deployer, id, false).unwrap();
        assert!(stack
            .producing_audit
            .of_kind(AuditEventKind::AssetSetActive)
            .is_empty());
        assert_eq!(
            stack.producing_audit.latest().unwrap(),
            AuditEvent::AssetSetInactive { asset_id: id }
        );

        let extra = ProducingReadExtra {
            new_co2_read: 300,
            service_down: false,
        };
        let err = stack
            .producing
            .save_smart_meter_read(
                addr(accounts::SMART_METER),
                id,
                300,
                false,
                "lastSmartMeterReadFileHash",
                extra,
            )
            .unwrap_err();
        assert_eq!(err, RegistryError::AssetNotActive(id));

        let err = stack
            .producing
            .save_smart_meter_read_bundle(
                addr(accounts::SMART_METER),
                id,
                300,
                false,
                "lastSmartMeterReadFileHash",
                extra,
            )
            .unwrap_err();
        assert_eq!(err, RegistryError::AssetNotActive(id));

        let err = stack
            .producing
            .set_active(addr(accounts::STRANGER), id, true)
            .unwrap_err();
        assert!(matches!(err, RegistryError::Unauthorized { .. }));

        stack.producing.set_active(stack.deployer, id, true).unwrap();
        assert_eq!(
            stack.producing_audit.latest().unwrap(),
            AuditEvent::AssetSetActive { asset_id: id }
        );

        // Setting the current state again records no duplicate-state event
        let before = stack.producing_audit.len();
        stack.producing.set_active(stack.deployer, id, true).unwrap();
        assert_eq!(stack.producing_audit.len(), before);
    }

    #[test]
    fn replaces_the_smart_meter_without_resetting_history() {
        let stack = deploy_stack();
        let id = onboard(&stack);
        for read in [100, 200, 300, 400] {
            submit(&stack, id, read);
        }

        let replacement = addr(accounts::ASSET_OWNER);
        let err = stack
            .producing
            .update_smart_meter(addr(accounts::STRANGER), id, replacement)
            .unwrap_err();
        assert!(matches!(err, RegistryError::Unauthorized { .. }));

        stack
            .producing
            .update_smart_meter(stack.deployer, id, replacement)
            .unwrap();

        let asset = stack.producing.asset(id).unwrap();
        assert_eq!(asset.smart_meter, replacement);
        assert_eq!(asset.last_read_wh, 400);
        assert_eq!(asset.last_read_file_hash, "lastSmartMeterReadFileHash");
        assert_eq!(asset.last_certificate_quantity_wh, 100);
        assert_eq!(asset.details.last_co2_offset_read, 400);
        assert_eq!(asset.details.max_owner_changes, 2);
        assert!(asset.active);
    }

    #[test]
    fn audit_trail_serializes_with_contract_field_names() {
        let stack = deploy_stack();
        let id = onboard(&stack);
        submit(&stack, id, 100);

        let json = serde_json::to_value(stack.producing_audit.entries()).unwrap();
        assert_eq!(json[0]["sequence"], 0);
        assert!(json[0]["event"]["asset_created"].is_object());

        let read = &json[1]["event"]["new_meter_read"];
        assert_eq!(read["asset_id"], 0);
        assert_eq!(read["old_read_wh"], 0);
        assert_eq!(read["new_read_wh"], 100);
        assert_eq!(read["certificate_quantity_wh"], 0);
        assert_eq!(read["meter_down"], false);
        assert_eq!(read["co2"]["new_read"], 100);
        assert_eq!(read["co2"]["service_down"], false);
    }

    #[test]
    fn rotation_entry_point_rejects_direct_callers() {
        let stack = deploy_stack();
        onboard(&stack);

        // Even the deployment account is not the registered owner; only the
        // lookup drives rotations.
        let err = stack
            .producing
            .update(stack.deployer, addr(contracts::PRODUCING_REGISTRY))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotOwner {
                caller: stack.deployer,
            }
        );
        assert_eq!(
            stack.producing.store_owner().unwrap(),
            stack.producing.address()
        );
    }
}
