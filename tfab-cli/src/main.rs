//! tfab: declarative configuration CLI for the controller.
//!
//! One subcommand per configuration object type. Every invocation resolves
//! the object, converges it to the requested state and prints the outcome
//! as JSON; any unresolved error exits non-zero.

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tfab_client::{Controller, ControllerConfig, Outcome};
use tfab_modules::modules::api_access_list::{self, ApiAccessListParams};
use tfab_modules::modules::bgp_as_a_service::BgpAsAServiceParams;
use tfab_modules::modules::bgp_router::BgpRouterParams;
use tfab_modules::modules::bms_vmi::{self, BmsVmiParams, VlanAssignment};
use tfab_modules::modules::fabric::{self, FabricParams};
use tfab_modules::modules::fabric_role_assignment::{
    self, DeviceRole, FabricRoleAssignmentParams,
};
use tfab_modules::modules::firewall_policy::FirewallPolicyParams;
use tfab_modules::modules::firewall_rule::FirewallRuleParams;
use tfab_modules::modules::global_system_config::GlobalSystemConfigParams;
use tfab_modules::modules::global_vrouter_config::GlobalVrouterConfigParams;
use tfab_modules::modules::loadbalancer::{self, LoadbalancerParams};
use tfab_modules::modules::loadbalancer_member::LoadbalancerMemberParams;
use tfab_modules::modules::loadbalancer_pool::LoadbalancerPoolParams;
use tfab_modules::modules::logical_router::LogicalRouterParams;
use tfab_modules::modules::network_policy::NetworkPolicyParams;
use tfab_modules::modules::physical_interface::PhysicalInterfaceParams;
use tfab_modules::modules::security_group::SecurityGroupParams;
use tfab_modules::modules::service_instance::ServiceInstanceParams;
use tfab_modules::modules::service_template::ServiceTemplateParams;
use tfab_modules::modules::tag::TagParams;
use tfab_modules::modules::virtual_machine::VirtualMachineParams;
use tfab_modules::modules::virtual_machine_interface::VirtualMachineInterfaceParams;
use tfab_modules::modules::virtual_network::VirtualNetworkParams;
use tfab_modules::modules::virtual_port_group::VirtualPortGroupParams;
use tfab_modules::{ConfigState, ProjectScope, apply};

/// Declarative configuration for the controller
#[derive(Parser)]
#[command(name = "tfab", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Connection arguments shared by every subcommand.
#[derive(Args, Debug)]
struct ControllerArgs {
    /// Controller address
    #[arg(long)]
    controller_ip: String,

    /// Web API username
    #[arg(long, default_value = "admin")]
    username: String,

    /// Web API password
    #[arg(long, default_value = "contrail123")]
    password: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

/// Domain/project scope shared by project-scoped subcommands.
#[derive(Args, Debug)]
struct ScopeArgs {
    /// Domain name
    #[arg(long, default_value = "default-domain")]
    domain: String,

    /// Project name
    #[arg(long, default_value = "default-project")]
    project: String,
}

impl ScopeArgs {
    fn scope(&self) -> ProjectScope {
        ProjectScope::new(&self.domain, &self.project)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StateArg {
    Present,
    Absent,
}

impl From<StateArg> for ConfigState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Present => ConfigState::Present,
            StateArg::Absent => ConfigState::Absent,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create or delete a virtual network
    VirtualNetwork {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        /// Virtual network name
        #[arg(long)]
        name: String,
        /// Subnet address, e.g. 10.0.1.0
        #[arg(long)]
        subnet: Option<String>,
        /// Subnet prefix length
        #[arg(long)]
        subnet_prefix: Option<u8>,
        /// Assign addresses from .1 upwards instead of .254 downwards
        #[arg(long)]
        addr_from_start: Option<bool>,
        /// Default gateway served by the vRouter
        #[arg(long)]
        default_gateway: Option<String>,
        /// DNS server address served by the vRouter
        #[arg(long)]
        dns_server_address: Option<String>,
        /// Serve DHCP from the vRouter
        #[arg(long)]
        enable_dhcp: Option<bool>,
        /// Nameservers handed out as DHCP option 6
        #[arg(long, value_delimiter = ',')]
        dns_nameservers: Option<Vec<String>>,
        #[arg(long)]
        flood_unknown_unicast: bool,
        #[arg(long)]
        ip_fabric_forwarding: bool,
        #[arg(long)]
        fabric_snat: bool,
        /// routed for fabric-manager routed networks
        #[arg(long)]
        virtual_network_category: Option<String>,
        /// enable or disable
        #[arg(long)]
        rpf: Option<String>,
        #[arg(long)]
        allow_transit: Option<bool>,
        /// default, l2_l3, l3 or l2
        #[arg(long)]
        forwarding_mode: Option<String>,
        #[arg(long)]
        vxlan_network_identifier: Option<u32>,
        /// Route targets, e.g. target:64512:101
        #[arg(long, value_delimiter = ',')]
        route_target_list: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',')]
        import_route_target_list: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',')]
        export_route_target_list: Option<Vec<String>>,
        /// network-policy references as domain:project:name
        #[arg(long, value_delimiter = ',')]
        network_policy_refs: Option<Vec<String>>,
        /// tag references as domain:project:type=value
        #[arg(long, value_delimiter = ',')]
        tag_refs: Option<Vec<String>>,
        /// Use this network as a provider network
        #[arg(long)]
        provider_network: bool,
        #[arg(long)]
        provider_network_physical_network: Option<String>,
        #[arg(long)]
        provider_network_segmentation_id: Option<u32>,
    },

    /// Create or delete a logical router
    LogicalRouter {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// snat-routing or vxlan-routing
        #[arg(long)]
        router_type: Option<String>,
        /// Networks to attach, by name within the same project
        #[arg(long, value_delimiter = ',')]
        connected_networks: Option<Vec<String>>,
        /// Route targets as asn:id (target: prefix is added)
        #[arg(long, value_delimiter = ',')]
        route_target_list: Option<Vec<String>>,
        #[arg(long)]
        vxlan_network_identifier: Option<u32>,
        /// Physical router names
        #[arg(long, value_delimiter = ',')]
        physical_router_refs: Option<Vec<String>>,
    },

    /// Create or delete a network policy
    NetworkPolicy {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// Policy rules as JSON documents
        #[arg(long, value_parser = parse_json)]
        policy_rule: Option<Vec<Value>>,
    },

    /// Create or delete a security group
    SecurityGroup {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// Policy rules as JSON documents
        #[arg(long, value_parser = parse_json)]
        policy_rule: Option<Vec<Value>>,
    },

    /// Create or delete a firewall rule
    FirewallRule {
        #[command(flatten)]
        controller: ControllerArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "default-domain")]
        domain: String,
        /// Project scope; omit for a global rule
        #[arg(long)]
        project: Option<String>,
        /// Endpoint as JSON, e.g. {"virtual_network": "default-domain:admin:vn1"}
        #[arg(long, value_parser = parse_json)]
        endpoint_1: Option<Value>,
        #[arg(long, value_parser = parse_json)]
        endpoint_2: Option<Value>,
        /// Service as JSON, e.g. {"protocol": "tcp"}
        #[arg(long, value_parser = parse_json)]
        service: Option<Value>,
        /// Action list as JSON, e.g. {"simple_action": "pass"}
        #[arg(long, value_parser = parse_json)]
        action_list: Option<Value>,
    },

    /// Create or delete a firewall policy
    FirewallPolicy {
        #[command(flatten)]
        controller: ControllerArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "default-domain")]
        domain: String,
        /// Project scope; omit for a global policy
        #[arg(long)]
        project: Option<String>,
        /// Rule names in evaluation order
        #[arg(long, value_delimiter = ',')]
        firewall_rules: Option<Vec<String>>,
    },

    /// Create or delete a tag
    Tag {
        #[command(flatten)]
        controller: ControllerArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        /// Tag value
        #[arg(long)]
        name: String,
        /// application, site, deployment, tier or label
        #[arg(long, default_value = "label")]
        tag_type: String,
        #[arg(long, default_value = "default-domain")]
        domain: String,
        /// Project scope; omit for a global tag
        #[arg(long)]
        project: Option<String>,
    },

    /// Create or delete a BGP router
    BgpRouter {
        #[command(flatten)]
        controller: ControllerArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// Peering address (also used as router identifier)
        #[arg(long)]
        address: String,
        #[arg(long)]
        autonomous_system: u32,
        /// control-node, external-control-node or router
        #[arg(long, default_value = "router")]
        router_type: String,
        #[arg(long)]
        vendor: Option<String>,
        #[arg(long, default_value = "90")]
        hold_time: u32,
        #[arg(long)]
        admin_down: bool,
        #[arg(long, value_delimiter = ',')]
        address_families: Option<Vec<String>>,
        /// Peer router names
        #[arg(long, value_delimiter = ',')]
        bgp_router_refs: Option<Vec<String>>,
    },

    /// Create or delete a BGPaaS endpoint
    BgpAsAService {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        #[arg(long)]
        autonomous_system: u32,
        #[arg(long)]
        bgpaas_ip_address: Option<String>,
        #[arg(long, default_value = "90")]
        hold_time: u32,
        #[arg(long, value_delimiter = ',', default_value = "inet")]
        address_families: Vec<String>,
    },

    /// Update the global system config
    GlobalSystemConfig {
        #[command(flatten)]
        controller: ControllerArgs,
        /// Global AS number of the cluster
        #[arg(long)]
        autonomous_system: Option<u32>,
    },

    /// Update the global vRouter config
    GlobalVrouterConfig {
        #[command(flatten)]
        controller: ControllerArgs,
        /// Flow export rate from vRouters
        #[arg(long)]
        flow_export_rate: Option<u32>,
    },

    /// Create or delete a service template
    ServiceTemplate {
        #[command(flatten)]
        controller: ControllerArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "default-domain")]
        domain: String,
        /// transparent, in-network or in-network-nat
        #[arg(long)]
        service_mode: String,
        #[arg(long, default_value = "virtual-machine")]
        service_virtualization_type: String,
        #[arg(long, default_value = "firewall")]
        service_type: String,
        #[arg(long, default_value = "2")]
        version: u32,
        #[arg(long, value_delimiter = ',', default_value = "left,right")]
        interface_type_list: Vec<String>,
    },

    /// Create or delete a service instance
    ServiceInstance {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        #[arg(long)]
        left_virtual_network: String,
        #[arg(long)]
        right_virtual_network: String,
        #[arg(long)]
        mgmt_virtual_network: Option<String>,
        /// Service template name within the same domain
        #[arg(long)]
        service_template: String,
    },

    /// Create or delete a virtual machine record
    VirtualMachine {
        #[command(flatten)]
        controller: ControllerArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// Orchestrator-assigned uuid
        #[arg(long)]
        uuid: String,
        /// VMI references as domain:project:name
        #[arg(long, value_delimiter = ',')]
        virtual_machine_interface_refs: Option<Vec<String>>,
    },

    /// Create or delete a virtual machine interface
    VirtualMachineInterface {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// Network to attach to (create only)
        #[arg(long)]
        virtual_network: Option<String>,
        /// Fixed MAC address (create only)
        #[arg(long)]
        mac_address: Option<String>,
        #[arg(long)]
        disable_policy: Option<bool>,
    },

    /// Create or delete a virtual port group
    VirtualPortGroup {
        #[command(flatten)]
        controller: ControllerArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// Fabric the group belongs to
        #[arg(long)]
        fabric: String,
        /// Member ports as router:interface pairs
        #[arg(long, value_delimiter = ',')]
        physical_interfaces: Option<Vec<String>>,
    },

    /// Create or delete a physical interface
    PhysicalInterface {
        #[command(flatten)]
        controller: ControllerArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// Device the interface belongs to
        #[arg(long)]
        physical_router: String,
        #[arg(long, default_value = "default-domain")]
        domain: String,
        /// Tenants to share with, as project:access pairs
        #[arg(long, value_parser = parse_share, value_delimiter = ',')]
        share: Option<Vec<(String, u32)>>,
    },

    /// Edit rbac entries on the default api-access-list
    ApiAccessList {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        /// Object type the rule covers, e.g. virtual-network
        #[arg(long)]
        rule_object: String,
        /// Field the rule covers; * for all
        #[arg(long, default_value = "*")]
        rule_field: String,
        #[arg(long, value_delimiter = ',')]
        role_name_list: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',')]
        role_crud_list: Option<Vec<String>>,
    },

    /// Create or delete a load balancer with its satellite objects
    Loadbalancer {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// native or opencontrail
        #[arg(long, default_value = "opencontrail")]
        loadbalancer_provider: String,
        /// Subnet uuid the VIP is allocated from
        #[arg(long)]
        vip_subnet_uuid: Option<String>,
        #[arg(long, value_delimiter = ',')]
        member_addresses: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',')]
        member_ports: Option<Vec<u16>>,
    },

    /// Create or delete a load-balancer pool
    LoadbalancerPool {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// Existing member uuids
        #[arg(long, value_delimiter = ',')]
        loadbalancer_member_uuid_list: Option<Vec<String>>,
    },

    /// Create or delete a load-balancer pool member
    LoadbalancerMember {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        /// Pool the member belongs to
        #[arg(long)]
        loadbalancer_pool: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        port: u16,
        #[arg(long, default_value = "1")]
        weight: u32,
        #[arg(long)]
        subnet_uuid: Option<String>,
    },

    /// Onboard or delete a fabric
    Fabric {
        #[command(flatten)]
        controller: ControllerArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "root")]
        device_username: String,
        #[arg(long, default_value = "")]
        device_password: String,
        /// Management CIDRs the devices live in
        #[arg(long, value_delimiter = ',')]
        management_subnets: Option<Vec<String>>,
    },

    /// Assign roles to fabric devices
    FabricRoleAssignment {
        #[command(flatten)]
        controller: ControllerArgs,
        /// Fabric name
        #[arg(long)]
        fabric: String,
        /// Assignments as device:physical_role:rb-role[;rb-role...]
        #[arg(long = "role", value_parser = parse_device_role)]
        roles: Vec<DeviceRole>,
    },

    /// Bind or unbind VLAN/network pairs on virtual port groups
    BmsVmi {
        #[command(flatten)]
        controller: ControllerArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
        /// Fabric name
        #[arg(long)]
        fabric: String,
        /// Assignments as vpg:vn:vlan
        #[arg(long = "assignment", value_parser = parse_assignment)]
        assignments: Vec<VlanAssignment>,
    },
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

fn parse_share(raw: &str) -> Result<(String, u32), String> {
    let (project, access) = raw
        .split_once(':')
        .ok_or_else(|| format!("{raw} is not a project:access pair"))?;
    let access = access.parse().map_err(|_| format!("invalid access {access}"))?;
    Ok((project.to_string(), access))
}

fn parse_device_role(raw: &str) -> Result<DeviceRole, String> {
    let mut parts = raw.splitn(3, ':');
    let device = parts.next().filter(|s| !s.is_empty());
    let physical_role = parts.next().filter(|s| !s.is_empty());
    let rb_roles = parts.next().unwrap_or_default();
    match (device, physical_role) {
        (Some(device), Some(physical_role)) => Ok(DeviceRole {
            device: device.to_string(),
            physical_role: physical_role.to_string(),
            routing_bridging_roles: rb_roles
                .split(';')
                .filter(|role| !role.is_empty())
                .map(str::to_string)
                .collect(),
        }),
        _ => Err(format!("{raw} is not a device:physical_role:rb-roles triple")),
    }
}

fn parse_assignment(raw: &str) -> Result<VlanAssignment, String> {
    let mut parts = raw.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(vpg), Some(vn), Some(vlan)) => Ok(VlanAssignment {
            virtual_port_group: vpg.to_string(),
            virtual_network: vn.to_string(),
            vlan_id: vlan.parse().map_err(|_| format!("invalid vlan {vlan}"))?,
        }),
        _ => Err(format!("{raw} is not a vpg:vn:vlan triple")),
    }
}

fn connect(args: &ControllerArgs) -> Result<Controller> {
    let config = ControllerConfig::new(
        &args.controller_ip,
        args.username.as_str(),
        args.password.as_str(),
    )
    .timeout(Duration::from_secs(args.timeout));
    Ok(Controller::new(config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "tfab_client=info,tfab_modules=info,reqwest=warn,hyper=warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let outcome = run(cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

async fn run(command: Commands) -> Result<Outcome> {
    let outcome = match command {
        Commands::VirtualNetwork {
            controller,
            scope,
            state,
            name,
            subnet,
            subnet_prefix,
            addr_from_start,
            default_gateway,
            dns_server_address,
            enable_dhcp,
            dns_nameservers,
            flood_unknown_unicast,
            ip_fabric_forwarding,
            fabric_snat,
            virtual_network_category,
            rpf,
            allow_transit,
            forwarding_mode,
            vxlan_network_identifier,
            route_target_list,
            import_route_target_list,
            export_route_target_list,
            network_policy_refs,
            tag_refs,
            provider_network,
            provider_network_physical_network,
            provider_network_segmentation_id,
        } => {
            let params = VirtualNetworkParams {
                name,
                scope: scope.scope(),
                subnet,
                subnet_prefix,
                addr_from_start,
                default_gateway,
                dns_server_address,
                enable_dhcp,
                dns_nameservers,
                flood_unknown_unicast,
                ip_fabric_forwarding,
                fabric_snat,
                virtual_network_category,
                rpf,
                allow_transit,
                forwarding_mode,
                vxlan_network_identifier,
                route_target_list,
                import_route_target_list,
                export_route_target_list,
                network_policy_refs,
                tag_refs,
                provider_network,
                provider_network_physical_network,
                provider_network_segmentation_id,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::LogicalRouter {
            controller,
            scope,
            state,
            name,
            router_type,
            connected_networks,
            route_target_list,
            vxlan_network_identifier,
            physical_router_refs,
        } => {
            let params = LogicalRouterParams {
                name,
                scope: scope.scope(),
                router_type,
                connected_networks,
                route_target_list,
                vxlan_network_identifier,
                physical_router_refs,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::NetworkPolicy {
            controller,
            scope,
            state,
            name,
            policy_rule,
        } => {
            let params = NetworkPolicyParams {
                name,
                scope: scope.scope(),
                policy_rule,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::SecurityGroup {
            controller,
            scope,
            state,
            name,
            policy_rule,
        } => {
            let params = SecurityGroupParams {
                name,
                scope: scope.scope(),
                policy_rule,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::FirewallRule {
            controller,
            state,
            name,
            domain,
            project,
            endpoint_1,
            endpoint_2,
            service,
            action_list,
        } => {
            let params = FirewallRuleParams {
                name,
                domain,
                project,
                endpoint_1,
                endpoint_2,
                service,
                action_list,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::FirewallPolicy {
            controller,
            state,
            name,
            domain,
            project,
            firewall_rules,
        } => {
            let params = FirewallPolicyParams {
                name,
                domain,
                project,
                firewall_rules,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::Tag {
            controller,
            state,
            name,
            tag_type,
            domain,
            project,
        } => {
            let params = TagParams {
                name,
                tag_type,
                domain,
                project,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::BgpRouter {
            controller,
            state,
            name,
            address,
            autonomous_system,
            router_type,
            vendor,
            hold_time,
            admin_down,
            address_families,
            bgp_router_refs,
        } => {
            let params = BgpRouterParams {
                name,
                address,
                autonomous_system,
                router_type: Some(router_type),
                vendor,
                hold_time: Some(hold_time),
                admin_down,
                address_families,
                bgp_router_refs,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::BgpAsAService {
            controller,
            scope,
            state,
            name,
            autonomous_system,
            bgpaas_ip_address,
            hold_time,
            address_families,
        } => {
            let params = BgpAsAServiceParams {
                name,
                scope: scope.scope(),
                autonomous_system,
                bgpaas_ip_address,
                hold_time: Some(hold_time),
                address_families: Some(address_families),
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::GlobalSystemConfig {
            controller,
            autonomous_system,
        } => {
            let params = GlobalSystemConfigParams { autonomous_system };
            apply::apply(&connect(&controller)?, &params, ConfigState::Present).await?
        }

        Commands::GlobalVrouterConfig {
            controller,
            flow_export_rate,
        } => {
            let params = GlobalVrouterConfigParams { flow_export_rate };
            apply::apply(&connect(&controller)?, &params, ConfigState::Present).await?
        }

        Commands::ServiceTemplate {
            controller,
            state,
            name,
            domain,
            service_mode,
            service_virtualization_type,
            service_type,
            version,
            interface_type_list,
        } => {
            let params = ServiceTemplateParams {
                name,
                domain,
                service_virtualization_type,
                service_mode,
                service_type,
                version,
                interface_type_list,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::ServiceInstance {
            controller,
            scope,
            state,
            name,
            left_virtual_network,
            right_virtual_network,
            mgmt_virtual_network,
            service_template,
        } => {
            let params = ServiceInstanceParams {
                name,
                scope: scope.scope(),
                left_virtual_network,
                right_virtual_network,
                mgmt_virtual_network,
                service_template,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::VirtualMachine {
            controller,
            state,
            name,
            uuid,
            virtual_machine_interface_refs,
        } => {
            let params = VirtualMachineParams {
                name,
                uuid,
                virtual_machine_interface_refs,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::VirtualMachineInterface {
            controller,
            scope,
            state,
            name,
            virtual_network,
            mac_address,
            disable_policy,
        } => {
            let params = VirtualMachineInterfaceParams {
                name,
                scope: scope.scope(),
                virtual_network,
                mac_address,
                disable_policy,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::VirtualPortGroup {
            controller,
            state,
            name,
            fabric,
            physical_interfaces,
        } => {
            let params = VirtualPortGroupParams {
                name,
                fabric,
                physical_interfaces,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::PhysicalInterface {
            controller,
            state,
            name,
            physical_router,
            domain,
            share,
        } => {
            let params = PhysicalInterfaceParams {
                name,
                physical_router,
                domain,
                share,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::ApiAccessList {
            controller,
            scope,
            state,
            rule_object,
            rule_field,
            role_name_list,
            role_crud_list,
        } => {
            let params = ApiAccessListParams {
                scope: scope.scope(),
                rule_object,
                rule_field,
                role_name_list,
                role_crud_list,
            };
            api_access_list::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::Loadbalancer {
            controller,
            scope,
            state,
            name,
            loadbalancer_provider,
            vip_subnet_uuid,
            member_addresses,
            member_ports,
        } => {
            let params = LoadbalancerParams {
                name,
                scope: scope.scope(),
                loadbalancer_provider,
                vip_subnet_uuid,
                member_addresses: member_addresses.unwrap_or_default(),
                member_ports: member_ports.unwrap_or_default(),
            };
            loadbalancer::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::LoadbalancerPool {
            controller,
            scope,
            state,
            name,
            loadbalancer_member_uuid_list,
        } => {
            let params = LoadbalancerPoolParams {
                name,
                scope: scope.scope(),
                loadbalancer_member_uuid_list,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::LoadbalancerMember {
            controller,
            scope,
            state,
            name,
            loadbalancer_pool,
            address,
            port,
            weight,
            subnet_uuid,
        } => {
            let params = LoadbalancerMemberParams {
                name,
                scope: scope.scope(),
                loadbalancer_pool,
                address,
                port,
                weight,
                subnet_uuid,
            };
            apply::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::Fabric {
            controller,
            state,
            name,
            device_username,
            device_password,
            management_subnets,
        } => {
            let params = FabricParams {
                name,
                device_username,
                device_password,
                management_subnets: management_subnets.unwrap_or_default(),
            };
            fabric::apply(&connect(&controller)?, &params, state.into()).await?
        }

        Commands::FabricRoleAssignment {
            controller,
            fabric,
            roles,
        } => {
            let params = FabricRoleAssignmentParams {
                fabric,
                device_roles: roles,
            };
            fabric_role_assignment::apply(&connect(&controller)?, &params).await?
        }

        Commands::BmsVmi {
            controller,
            scope,
            state,
            fabric,
            assignments,
        } => {
            let params = BmsVmiParams {
                fabric,
                scope: scope.scope(),
                assignments,
            };
            bms_vmi::apply(&connect(&controller)?, &params, state.into()).await?
        }
    };

    Ok(outcome)
}
