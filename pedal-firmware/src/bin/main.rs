// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{Config as UartConfig, Uart};

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use pedal_steuerung::config::*;
use pedal_steuerung::tasks::{PedalHw, pedal_task};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt den Pedal-Task.
/// Danach schläft main() - alle Arbeit läuft im Task.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Potentiometer: CS inaktiv (high), INC im Ruhepegel (high)
    info!(
        "Pots: CS={}, INC=GPIO{}, U/D=GPIO{}",
        POT_CS_PINS, POT_INC_PIN, POT_UD_PIN
    );
    let out = OutputConfig::default();
    let chip_selects = [
        Output::new(peripherals.GPIO0, Level::High, out),
        Output::new(peripherals.GPIO1, Level::High, out),
        Output::new(peripherals.GPIO2, Level::High, out),
        Output::new(peripherals.GPIO3, Level::High, out),
    ];
    let increment = Output::new(peripherals.GPIO4, Level::High, out);
    let up_down = Output::new(peripherals.GPIO5, Level::Low, out);

    // Taster und Drehgeber: Pull-up, active low
    info!(
        "Inputs: SELECT=GPIO{}, UP=GPIO{}, DOWN=GPIO{}, ENC=GPIO{}/{}/{}",
        BUTTON_SELECT_PIN,
        BUTTON_UP_PIN,
        BUTTON_DOWN_PIN,
        ENCODER_CLK_PIN,
        ENCODER_DT_PIN,
        ENCODER_SW_PIN
    );
    let pull_up = InputConfig::default().with_pull(Pull::Up);
    let select = Input::new(peripherals.GPIO10, pull_up);
    let up = Input::new(peripherals.GPIO11, pull_up);
    let down = Input::new(peripherals.GPIO14, pull_up);
    let encoder_clk = Input::new(peripherals.GPIO21, pull_up);
    let encoder_dt = Input::new(peripherals.GPIO22, pull_up);
    let encoder_switch = Input::new(peripherals.GPIO23, pull_up);

    // UART zur App
    info!(
        "Serial: TX=GPIO{}, RX=GPIO{}, {} baud",
        SERIAL_TX_PIN, SERIAL_RX_PIN, SERIAL_BAUD
    );
    let uart = Uart::new(
        peripherals.UART1,
        UartConfig::default().with_baudrate(SERIAL_BAUD),
    )
    .expect("Failed to initialize UART1")
    .with_tx(peripherals.GPIO16)
    .with_rx(peripherals.GPIO17);

    // I2C zum Display
    info!(
        "Display: SDA=GPIO{}, SCL=GPIO{}",
        DISPLAY_SDA_PIN, DISPLAY_SCL_PIN
    );
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(DISPLAY_I2C_KHZ)),
    )
    .expect("Failed to initialize I2C0")
    .with_sda(peripherals.GPIO6)
    .with_scl(peripherals.GPIO7);

    let hw = PedalHw {
        chip_selects,
        increment,
        up_down,
        select,
        up,
        down,
        encoder_clk,
        encoder_dt,
        encoder_switch,
        uart,
        i2c,
    };

    // Spawn Pedal Task (einziger Task, keine Nebenläufigkeit am Pedal-Zustand)
    spawner.spawn(pedal_task(hw)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft im Task)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
