//! One module per configuration object type.
//!
//! Standard modules implement [`crate::ConfigObject`] and converge through
//! [`crate::apply::apply`]. Modules whose flow deviates from plain object
//! CRUD (job-driven fabric onboarding, the composite load balancer, rbac
//! entry editing, baremetal VMI wiring) export their own `apply`.

pub mod api_access_list;
pub mod bgp_as_a_service;
pub mod bgp_router;
pub mod bms_vmi;
pub mod fabric;
pub mod fabric_role_assignment;
pub mod firewall_policy;
pub mod firewall_rule;
pub mod global_system_config;
pub mod global_vrouter_config;
pub mod loadbalancer;
pub mod loadbalancer_member;
pub mod loadbalancer_pool;
pub mod logical_router;
pub mod network_policy;
pub mod physical_interface;
pub mod security_group;
pub mod service_instance;
pub mod service_template;
pub mod tag;
pub mod virtual_machine;
pub mod virtual_machine_interface;
pub mod virtual_network;
pub mod virtual_port_group;
