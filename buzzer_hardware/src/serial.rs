use stm32f4xx_hal::{pac::USART1, serial::Tx};

/// Transmit-only USART1 on PA9, used by the serial logger.
pub type DebugSerialPort = Tx<USART1>;
