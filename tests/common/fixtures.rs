use std::path::{Path, PathBuf};

use serde_json::{Value, json};

/// A trimmed down Kubernetes API schema covering the shapes found in the real document
pub fn swagger() -> Value {
  json!({
    "swagger": "2.0",
    "info": { "title": "Kubernetes", "version": "v1.21.0" },
    "definitions": {
      "io.k8s.api.apps.v1.Deployment": {
        "description": "Deployment enables declarative updates for Pods and ReplicaSets.",
        "properties": {
          "spec": { "description": "Specification of the desired behavior of the Deployment." }
        },
        "type": "object",
        "x-kubernetes-group-version-kind": [{ "group": "apps", "kind": "Deployment", "version": "v1" }]
      },
      "io.k8s.api.core.v1.PodSpec": {
        "properties": {
          "serviceAccount": {
            "description": "DeprecatedServiceAccount is a depreciated alias for ServiceAccountName.\nDeprecated: Use serviceAccountName instead.",
            "type": "string"
          },
          "containers": { "description": "List of containers belonging to the pod." }
        },
        "required": ["containers"],
        "type": "object"
      },
      "io.k8s.api.core.v1.Pod": {
        "description": "Pod is a collection of containers that can run on a host.",
        "properties": {
          "spec": { "description": "Specification of the desired behavior of the pod." }
        },
        "type": "object",
        "x-kubernetes-group-version-kind": [{ "group": "", "kind": "Pod", "version": "v1" }]
      },
      "io.k8s.api.policy.v1beta1.PodSecurityPolicy": {
        "description": "PodSecurityPolicy governs the ability to make requests that affect the Security Context that will be applied to a pod and container.\nDeprecated in 1.21.",
        "type": "object",
        "x-kubernetes-group-version-kind": [{ "group": "policy", "kind": "PodSecurityPolicy", "version": "v1beta1" }]
      },
      "io.k8s.api.extensions.v1beta1.Ingress": {
        "description": "Ingress is a collection of rules that allow inbound connections to reach the endpoints defined by a backend. DEPRECATED - This group version of Ingress is deprecated by networking.k8s.io/v1beta1 Ingress.",
        "properties": {
          "backend": { "description": "A default backend capable of servicing requests that don't match any rule." }
        },
        "type": "object",
        "x-kubernetes-group-version-kind": [{ "group": "extensions", "kind": "Ingress", "version": "v1beta1" }]
      },
      "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta": {
        "description": "ObjectMeta is metadata that all persisted resources must have.",
        "properties": {
          "name": { "description": "Name must be unique within a namespace." }
        },
        "type": "object"
      },
      "io.k8s.apimachinery.pkg.api.resource.Quantity": {
        "description": "Quantity is a fixed-point representation of a number.",
        "type": "string"
      },
      "io.k8s.api.core.v1.ComponentStatus": {
        "description": "ComponentStatus (and ComponentStatusList) holds the cluster validation info. Deprecated: This API is deprecated in v1.19+",
        "properties": {
          "conditions": { "description": "List of component conditions observed" }
        },
        "type": "object",
        "x-kubernetes-group-version-kind": [{ "group": "", "kind": "ComponentStatus", "version": "v1" }]
      },
      "io.k8s.api.core.v1.Broken": {
        "description": "Broken carries a malformed group/version/kind extension.",
        "properties": {
          "spec": { "description": "Deprecated: never rendered." }
        },
        "x-kubernetes-group-version-kind": "v1/Broken"
      },
      "io.k8s.api.apps.v1.StatefulSetSpec": {
        "description": "A StatefulSetSpec is the specification of a StatefulSet.",
        "properties": {
          "serviceName": { "description": "serviceName is the name of the service that governs this StatefulSet." }
        },
        "type": "object"
      }
    }
  })
}

/// Writes the fixture schema where the version lookup expects it
pub fn write_swagger(dir: &Path, version: &str) -> PathBuf {
  let path = dir.join(format!("swagger-{version}.json"));
  std::fs::write(&path, serde_json::to_vec_pretty(&swagger()).unwrap()).unwrap();
  path
}
