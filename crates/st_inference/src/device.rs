use candle_core::utils::{cuda_is_available, metal_is_available};
use candle_core::Device;
use st_core::{Error, Result};

/// Where the model should be placed. Decided once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevicePreference {
    /// Accelerator if one was compiled in and is present, else CPU.
    #[default]
    Auto,
    Cpu,
}

impl DevicePreference {
    pub fn from_force_cpu(force_cpu: bool) -> Self {
        if force_cpu {
            DevicePreference::Cpu
        } else {
            DevicePreference::Auto
        }
    }
}

pub fn select_device(preference: DevicePreference) -> Result<Device> {
    let device = match preference {
        DevicePreference::Cpu => Device::Cpu,
        DevicePreference::Auto if cuda_is_available() => {
            Device::new_cuda(0).map_err(|e| Error::Load(format!("CUDA device: {}", e)))?
        }
        DevicePreference::Auto if metal_is_available() => {
            Device::new_metal(0).map_err(|e| Error::Load(format!("Metal device: {}", e)))?
        }
        DevicePreference::Auto => Device::Cpu,
    };
    tracing::info!("Using device {}", describe(&device));
    Ok(device)
}

pub fn describe(device: &Device) -> String {
    if device.is_cuda() {
        "cuda:0".to_string()
    } else if device.is_metal() {
        "metal:0".to_string()
    } else {
        "cpu".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_cpu() {
        assert_eq!(DevicePreference::from_force_cpu(true), DevicePreference::Cpu);
        assert_eq!(DevicePreference::from_force_cpu(false), DevicePreference::Auto);

        let device = select_device(DevicePreference::Cpu).unwrap();
        assert!(device.is_cpu());
        assert_eq!(describe(&device), "cpu");
    }
}
